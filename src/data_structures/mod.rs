pub mod bucket_queue;
pub mod priority_queue;
pub mod unique_key;

pub use bucket_queue::{BatchBucketQueue, Pulled};
pub use priority_queue::LazyMinHeap;
pub use unique_key::UniqueKey;
