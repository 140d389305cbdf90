//! 内存产品存储
//!
//! 所有操作在同一次加锁内完成，锁从不跨越 `.await`，
//! 因此 "查找后修改" 之类的读改写序列对其他请求是原子的。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::app::product::model::{seed_products, Product, ProductInput};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("product id {0} already exists")]
    DuplicateId(String),
}

/// 产品集合句柄，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Arc<Mutex<Vec<Product>>>,
}

impl ProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    /// 使用五条示例数据初始化
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Product>> {
        // 列表在两次操作之间始终一致，中毒后继续使用
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// 按插入顺序返回当前快照
    pub fn list(&self) -> Vec<Product> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.guard().iter().find(|p| p.id == id).cloned()
    }

    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.guard();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::DuplicateId(product.id));
        }
        products.push(product);
        Ok(())
    }

    /// 覆盖除 `id` 外的全部字段，位置不变
    pub fn replace(&self, id: &str, input: ProductInput) -> Option<Product> {
        let mut products = self.guard();
        let product = products.iter_mut().find(|p| p.id == id)?;
        product.apply(input);
        Some(product.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Product> {
        let mut products = self.guard();
        let index = products.iter().position(|p| p.id == id)?;
        Some(products.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: "desc".to_string(),
            price: 9.5,
            category: "toys".to_string(),
            in_stock: false,
        }
    }

    #[test]
    fn seeded_store_keeps_insertion_order() {
        let store = ProductStore::seeded();
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn find_by_id_is_exact_match() {
        let store = ProductStore::seeded();
        assert_eq!(store.find_by_id("3").unwrap().name, "Coffee Maker");
        assert!(store.find_by_id("30").is_none());
        assert!(store.find_by_id("").is_none());
    }

    #[test]
    fn insert_appends_and_rejects_duplicates() {
        let store = ProductStore::seeded();
        store
            .insert(Product::from_input("abc".to_string(), input("Kite")))
            .unwrap();
        assert_eq!(store.len(), 6);
        assert_eq!(store.list().last().unwrap().id, "abc");

        let err = store
            .insert(Product::from_input("1".to_string(), input("Clone")))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("1".to_string()));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn replace_preserves_id_and_position() {
        let store = ProductStore::seeded();
        let updated = store.replace("2", input("Kite")).unwrap();
        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "Kite");
        assert!(!updated.in_stock);
        assert_eq!(store.list()[1], updated);
    }

    #[test]
    fn replace_missing_leaves_store_unchanged() {
        let store = ProductStore::seeded();
        let before = store.list();
        assert!(store.replace("999", input("Kite")).is_none());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn remove_compacts_collection() {
        let store = ProductStore::seeded();
        let removed = store.remove("2").unwrap();
        assert_eq!(removed.name, "Smartphone");
        let ids: Vec<String> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "3", "4", "5"]);
        assert!(store.remove("2").is_none());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn clones_share_the_same_collection() {
        let store = ProductStore::default();
        assert!(store.is_empty());
        let handle = store.clone();
        handle
            .insert(Product::from_input("x".to_string(), input("Kite")))
            .unwrap();
        assert_eq!(store.len(), 1);
    }
}
