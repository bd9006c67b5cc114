pub mod atomic_writer;
pub mod json_selection_store;
pub mod memory_store;

pub use atomic_writer::AtomicWriter;
pub use json_selection_store::JsonSelectionStore;
pub use memory_store::MemorySelectionStore;
