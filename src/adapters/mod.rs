// Adapters layer: concrete implementations of the domain ports (storage, store reader, WMS).

pub mod json_reader;
pub mod storage;
pub mod wms_client;

pub use json_reader::JsonExtractReader;
pub use storage::LocalStorage;
pub use wms_client::HttpWmsClient;
