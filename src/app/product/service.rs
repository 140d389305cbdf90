//! 产品业务服务

use tracing::info;
use uuid::Uuid;

use super::model::{Product, ProductInput, ProductPage, ProductQuery, ProductStats};
use crate::core::error::ApiError;
use crate::infrastructure::store::ProductStore;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone)]
pub struct ProductService {
    store: ProductStore,
}

impl ProductService {
    pub fn new(store: ProductStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    /// 过滤后分页
    pub fn list(&self, query: &ProductQuery) -> ProductPage {
        let filtered = filter_products(self.store.list(), query);
        let page = parse_or_default(query.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_or_default(query.limit.as_deref(), DEFAULT_LIMIT);
        paginate(filtered, page, limit)
    }

    pub fn get(&self, id: &str) -> Result<Product, ApiError> {
        self.store
            .find_by_id(id)
            .ok_or_else(|| ApiError::product_not_found(id))
    }

    pub fn create(&self, input: ProductInput) -> Result<Product, ApiError> {
        let product = Product::from_input(Uuid::new_v4().to_string(), input);
        self.store.insert(product.clone())?;
        info!(id = %product.id, "product created");
        Ok(product)
    }

    pub fn update(&self, id: &str, input: ProductInput) -> Result<Product, ApiError> {
        let product = self
            .store
            .replace(id, input)
            .ok_or_else(|| ApiError::product_not_found(id))?;
        info!(%id, "product updated");
        Ok(product)
    }

    pub fn delete(&self, id: &str) -> Result<Product, ApiError> {
        let product = self
            .store
            .remove(id)
            .ok_or_else(|| ApiError::product_not_found(id))?;
        info!(%id, "product deleted");
        Ok(product)
    }

    pub fn stats(&self) -> ProductStats {
        ProductStats::from_products(&self.store.list())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// 按分类 (忽略大小写相等)、名称 (忽略大小写包含) 与库存状态过滤
pub fn filter_products(mut products: Vec<Product>, query: &ProductQuery) -> Vec<Product> {
    if let Some(category) = non_empty(query.category.as_deref()) {
        let category = category.to_lowercase();
        products.retain(|p| p.category.to_lowercase() == category);
    }

    if let Some(search) = non_empty(query.search.as_deref()) {
        let search = search.to_lowercase();
        products.retain(|p| p.name.to_lowercase().contains(&search));
    }

    if let Some(in_stock) = non_empty(query.in_stock.as_deref()) {
        let in_stock = in_stock == "true";
        products.retain(|p| p.in_stock == in_stock);
    }

    products
}

/// 解析字符串开头的整数：可选空白、可选符号、至少一位数字，忽略其后内容
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &digits[..digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits
        .bytes()
        .try_fold(0i64, |acc, b| {
            acc.checked_mul(10)?.checked_add(i64::from(b - b'0'))
        })
        .unwrap_or(i64::MAX);

    Some(if negative { -magnitude } else { magnitude })
}

/// 无法解析或为 0 时使用默认值
pub fn parse_or_default(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(parse_int_prefix)
        .filter(|n| *n != 0)
        .unwrap_or(default)
}

/// 取 `[(page-1)*limit, (page-1)*limit + limit)` 区间，越界时返回空列表
pub fn paginate(products: Vec<Product>, page: i64, limit: i64) -> ProductPage {
    let total = products.len();

    let total_pages = match usize::try_from(limit) {
        Ok(limit) if limit > 0 => total.div_ceil(limit) as u64,
        _ => 0,
    };

    let slice = if page < 1 || limit < 1 {
        Vec::new()
    } else {
        let start = (page - 1)
            .checked_mul(limit)
            .and_then(|start| usize::try_from(start).ok())
            .unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        products.into_iter().skip(start).take(limit).collect()
    };

    ProductPage {
        page,
        limit,
        total,
        total_pages,
        products: slice,
    }
}
