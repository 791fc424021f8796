//! RocksDB column family layout.

use rocksdb::{ColumnFamilyDescriptor, Options};

pub const CF_TOPICS: &str = "topics";
pub const CF_DOCS: &str = "docs";
pub const CF_SEEN: &str = "seen";
pub const CF_CLUSTER_STATES: &str = "cluster_states";

pub const ALL_CF_NAMES: &[&str] = &[CF_TOPICS, CF_DOCS, CF_SEEN, CF_CLUSTER_STATES];

fn compressed_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    ALL_CF_NAMES
        .iter()
        .map(|name| ColumnFamilyDescriptor::new(*name, compressed_options()))
        .collect()
}
