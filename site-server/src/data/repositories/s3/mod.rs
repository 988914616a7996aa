pub(crate) mod blob_store;
