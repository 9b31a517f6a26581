use crate::dns_record::DnsRecord;
use std::fmt;

/// DNS response status (RFC 1035 §4.1.1, RFC 2136 §2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    YXDomain,
    YXRRSet,
    NXRRSet,
    NotAuth,
    NotZone,
    Unknown(u16),
}

impl ResponseCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => Self::NoError,
            1 => Self::FormErr,
            2 => Self::ServFail,
            3 => Self::NXDomain,
            4 => Self::NotImp,
            5 => Self::Refused,
            6 => Self::YXDomain,
            7 => Self::YXRRSet,
            8 => Self::NXRRSet,
            9 => Self::NotAuth,
            10 => Self::NotZone,
            other => Self::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YXDomain => "YXDOMAIN",
            Self::YXRRSet => "YXRRSET",
            Self::NXRRSet => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Codes that settle the question for the queried name, as opposed to a
    /// malformed exchange (FORMERR) or an unassigned code.
    pub fn is_definitive_error(&self) -> bool {
        matches!(
            self,
            Self::NXDomain
                | Self::ServFail
                | Self::Refused
                | Self::NotImp
                | Self::YXDomain
                | Self::YXRRSet
                | Self::NXRRSet
                | Self::NotAuth
                | Self::NotZone
        )
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "RCODE{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A decoded DNS message reduced to the parts the resolver consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,

    /// QR bit: set on responses.
    pub is_response: bool,

    pub rcode: ResponseCode,

    pub answers: Vec<DnsRecord>,

    pub authorities: Vec<DnsRecord>,

    pub additionals: Vec<DnsRecord>,
}

impl DnsMessage {
    pub fn response(id: u16, rcode: ResponseCode) -> Self {
        Self {
            id,
            is_response: true,
            rcode,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn with_answers(mut self, records: Vec<DnsRecord>) -> Self {
        self.answers = records;
        self
    }

    pub fn with_authorities(mut self, records: Vec<DnsRecord>) -> Self {
        self.authorities = records;
        self
    }

    pub fn with_additionals(mut self, records: Vec<DnsRecord>) -> Self {
        self.additionals = records;
        self
    }

    pub fn is_noerror(&self) -> bool {
        self.rcode == ResponseCode::NoError
    }

    /// Answer, authority then additional records: the order delegation
    /// extraction scans them in.
    pub fn delegation_records(&self) -> impl Iterator<Item = &DnsRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }

    /// Answer, additional then authority records: the order answer matching
    /// scans them in.
    pub fn answer_records(&self) -> impl Iterator<Item = &DnsRecord> {
        self.answers
            .iter()
            .chain(self.additionals.iter())
            .chain(self.authorities.iter())
    }
}
