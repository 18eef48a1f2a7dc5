use crate::ports::outbound::{RecordStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{OwnerEdge, PrincipalId, TransactionRecord};
use std::collections::{HashMap, HashSet};

/// In-memory record store.
///
/// A single `RwLock` guards records and ownership edges, so the
/// check-and-insert in `insert_if_absent` is atomic. Listing order is
/// insertion order.
#[derive(Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, TransactionRecord>,
    order: Vec<String>,
    edges: HashSet<OwnerEdge>,
    edge_order: Vec<OwnerEdge>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct ownership edges.
    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_by_hashes(
        &self,
        hashes: &HashSet<String>,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let inner = self.inner.read();
        Ok(hashes
            .iter()
            .filter_map(|hash| inner.records.get(hash).cloned())
            .collect())
    }

    async fn insert_if_absent(
        &self,
        record: TransactionRecord,
    ) -> Result<TransactionRecord, StoreError> {
        let mut inner = self.inner.write();
        if inner.records.contains_key(&record.hash) {
            return Err(StoreError::Duplicate { hash: record.hash });
        }
        inner.order.push(record.hash.clone());
        inner.records.insert(record.hash.clone(), record.clone());
        Ok(record)
    }

    async fn associate_owner(
        &self,
        hash: &str,
        principal: &PrincipalId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.records.contains_key(hash) {
            return Err(StoreError::other(format!("no stored record for {}", hash)));
        }
        let edge = OwnerEdge::new(*principal, hash);
        if inner.edges.insert(edge.clone()) {
            inner.edge_order.push(edge);
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|hash| inner.records.get(hash).cloned())
            .collect())
    }

    async fn find_by_owner(
        &self,
        principal: &PrincipalId,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .edge_order
            .iter()
            .filter(|edge| edge.principal == *principal)
            .filter_map(|edge| inner.records.get(&edge.hash).cloned())
            .collect())
    }
}
