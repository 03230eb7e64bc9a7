use rkyv::rancor::Error;
use rkyv::util::AlignedVec;

pub const COMPLETION_RECORD_VERSION: u32 = 1;
pub const COMPLETION_KEY_PREFIX: &str = "wayfinder.tour.completed.";

#[derive(Clone, Debug, PartialEq, rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)]
pub struct CompletionRecord {
    pub version: u32,
    pub user_id: String,
    pub completed_at_ms: f64,
}

impl CompletionRecord {
    pub fn new(user_id: &str, completed_at_ms: f64) -> Self {
        Self {
            version: COMPLETION_RECORD_VERSION,
            user_id: user_id.to_string(),
            completed_at_ms,
        }
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

pub fn completion_key(user_id: &str) -> String {
    format!("{COMPLETION_KEY_PREFIX}{}", user_id.trim())
}

pub fn encode_record(record: &CompletionRecord) -> Option<Vec<u8>> {
    rkyv::to_bytes::<Error>(record)
        .ok()
        .map(|bytes| bytes.into_vec())
}

pub fn decode_record(bytes: &[u8]) -> Option<CompletionRecord> {
    let mut aligned = AlignedVec::<16>::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    let record = rkyv::from_bytes::<CompletionRecord, Error>(&aligned).ok()?;
    if record.version != COMPLETION_RECORD_VERSION {
        return None;
    }
    Some(record)
}
