pub mod resolve_record;

pub use resolve_record::ResolveRecordUseCase;
