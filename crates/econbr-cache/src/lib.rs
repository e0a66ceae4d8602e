pub mod answers;
pub mod key;

pub use answers::{AnswerCache, CacheInfo};
pub use key::{answer_cache_key, normalize_query};
