pub mod history;
pub mod io;
pub mod store;

pub use history::{History, HistoryMode, Snapshot};
pub use io::{
    ImageLoadRequest, ImageProbe, ImageProbeError, InMemoryStorage, ProjectMeta, ProjectStorage,
    StorageError, StoredProject,
};
pub use store::Store;
