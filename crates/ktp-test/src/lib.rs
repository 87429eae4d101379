#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub use mock::{
    MockConfig, MockObjectStore, MockRecognizerConfig, MockStorageConfig, MockTextRecognizer,
    StoredObject, create_mock_gateways,
};
