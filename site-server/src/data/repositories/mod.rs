pub(crate) mod postgres;
pub(crate) mod s3;
