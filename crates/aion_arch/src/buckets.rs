//! Cell-type and site-bucket indices.
//!
//! Both indices are derived from the full site set once, then frozen.
//! [`BucketIndex::build`] takes the [`CellTypes`] it depends on, so the build
//! order is fixed by the signatures: there is no way to query a bucket before
//! the cell types exist.

use crate::device::{BucketKey, Device};
use crate::ids::SiteId;
use aion_common::{Ident, Interner};
use std::collections::{HashMap, HashSet};

/// The sorted, duplicate-free set of site type symbols in a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTypes {
    types: Vec<Ident>,
}

impl CellTypes {
    /// Scans every site and collects the distinct site types, ordered by name.
    ///
    /// Ordering by resolved name rather than by symbol index keeps the result
    /// independent of interning order.
    pub fn collect<D: Device + ?Sized>(device: &D, interner: &Interner) -> Self {
        let distinct: HashSet<Ident> = device
            .sites()
            .into_iter()
            .map(|site| device.site_type(site))
            .collect();
        let mut types: Vec<Ident> = distinct.into_iter().collect();
        types.sort_by(|a, b| interner.resolve(*a).cmp(interner.resolve(*b)));
        Self { types }
    }

    /// The cell types, sorted by name.
    pub fn as_slice(&self) -> &[Ident] {
        &self.types
    }

    /// Number of distinct cell types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` for a device with no sites.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Sites partitioned into buckets of type-compatible locations.
#[derive(Debug, Clone)]
pub struct BucketIndex<B> {
    buckets: Vec<B>,
    sites: HashMap<B, Vec<SiteId>>,
}

impl<B: BucketKey> BucketIndex<B> {
    /// Builds the bucket index.
    ///
    /// Every cell type gets a bucket, even one no site falls into, so that a
    /// placer asking for the bucket of any known cell type finds it. Each
    /// site is then appended to the bucket [`Device::bucket_for_site`] names.
    pub fn build<D: Device<BucketId = B> + ?Sized>(device: &D, cell_types: &CellTypes) -> Self {
        let mut sites: HashMap<B, Vec<SiteId>> = HashMap::new();
        for &cell_type in cell_types.as_slice() {
            sites.entry(device.bucket_for_cell_type(cell_type)).or_default();
        }
        for site in device.sites() {
            sites.entry(device.bucket_for_site(site)).or_default().push(site);
        }
        let mut buckets: Vec<B> = sites.keys().copied().collect();
        buckets.sort();
        Self { buckets, sites }
    }

    /// All bucket keys, sorted.
    pub fn buckets(&self) -> &[B] {
        &self.buckets
    }

    /// Sites in `bucket`, in device order.
    ///
    /// # Panics
    ///
    /// Panics if `bucket` is not in the index.
    pub fn sites_in_bucket(&self, bucket: B) -> &[SiteId] {
        match self.sites.get(&bucket) {
            Some(sites) => sites.as_slice(),
            None => panic!("sites_in_bucket: unknown bucket {bucket:?}"),
        }
    }

    /// Sites in `bucket`, or `None` if no site of the device falls in it.
    pub fn get(&self, bucket: B) -> Option<&[SiteId]> {
        self.sites.get(&bucket).map(Vec::as_slice)
    }

    /// Total number of sites across all buckets.
    pub fn site_count(&self) -> usize {
        self.sites.values().map(Vec::len).sum()
    }
}
