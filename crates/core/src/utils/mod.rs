pub mod serde_formats;
