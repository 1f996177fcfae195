mod entry_queue;

pub use entry_queue::{
    DEFAULT_QUEUE_CAPACITY, EntryReceiver, EntrySender, QueueClosed, QueueItem, entry_queue,
};
