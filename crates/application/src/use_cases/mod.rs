pub mod dns;

pub use dns::ResolveRecordUseCase;
