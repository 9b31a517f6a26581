use ferrous_authdns_domain::{AddressSource, DnsRecord, NsInfo, ResolveError};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Prints the outcome; returns whether it was a success.
pub fn record(format: Format, result: Result<DnsRecord, ResolveError>) -> anyhow::Result<bool> {
    match (format, result) {
        (Format::Json, Ok(record)) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(true)
        }
        (Format::Text, Ok(record)) => {
            println!(
                "{}\t{}\tIN\t{}\t{}",
                record.name, record.ttl, record.record_type, record.data
            );
            Ok(true)
        }
        (format, Err(err)) => error(format, &err),
    }
}

pub fn nameservers(format: Format, result: Result<NsInfo, ResolveError>) -> anyhow::Result<bool> {
    let info = match result {
        Ok(info) => info,
        Err(err) => return error(format, &err),
    };

    match format {
        Format::Json => {
            let nameservers: Vec<_> = info
                .nameservers
                .iter()
                .map(|ns| {
                    json!({
                        "name": ns.name,
                        "ipv4": address(&ns.ipv4),
                        "ipv6": address(&ns.ipv6),
                    })
                })
                .collect();
            let body = json!({ "zone": info.zone, "nameservers": nameservers });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Format::Text => {
            for ns in &info.nameservers {
                let glue: Vec<String> = [&ns.ipv4, &ns.ipv6]
                    .into_iter()
                    .filter_map(address)
                    .collect();
                println!("{}\tNS\t{}\t{}", info.zone, ns.name, glue.join(" "));
            }
        }
    }
    Ok(true)
}

fn error(format: Format, err: &ResolveError) -> anyhow::Result<bool> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(err)?),
        Format::Text => {
            eprintln!("{}: {}", err.code, err.message);
            if let Some(details) = &err.details {
                eprintln!("  {}", details);
            }
        }
    }
    Ok(false)
}

fn address(source: &AddressSource) -> Option<String> {
    match source {
        AddressSource::Known(ip) => Some(ip.to_string()),
        AddressSource::Lookup(_) | AddressSource::Unavailable => None,
    }
}
