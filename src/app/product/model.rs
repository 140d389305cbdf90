//! 产品数据模型

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_number")]
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// 已通过校验的产品字段 (除 `id` 外的全部可变字段)
///
/// 字符串字段已去除首尾空白。
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn from_input(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// 覆盖除 `id` 之外的所有字段
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// 列表查询参数，全部以原始字符串接收
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub in_stock: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// 分页列表响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub page: i64,
    pub limit: i64,
    pub total: usize,
    pub total_pages: u64,
    pub products: Vec<Product>,
}

/// 产品统计
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub total_in_stock: usize,
    pub total_out_of_stock: usize,
    pub categories: CategoryCounts,
    /// 空集合时为 `null`
    #[serde(serialize_with = "serialize_optional_number")]
    pub average_price: Option<f64>,
    pub highest_priced_product: Option<Product>,
    pub lowest_priced_product: Option<Product>,
}

impl ProductStats {
    pub fn from_products(products: &[Product]) -> Self {
        let total_products = products.len();
        let total_in_stock = products.iter().filter(|p| p.in_stock).count();

        let mut categories = CategoryCounts::default();
        for product in products {
            categories.increment(&product.category);
        }

        let average_price = if total_products == 0 {
            None
        } else {
            let total_price: f64 = products.iter().map(|p| p.price).sum();
            Some(total_price / total_products as f64)
        };

        // 稳定排序：同价时保持插入顺序
        let mut sorted_by_price: Vec<&Product> = products.iter().collect();
        sorted_by_price.sort_by(|a, b| a.price.total_cmp(&b.price));

        Self {
            total_products,
            total_in_stock,
            total_out_of_stock: total_products - total_in_stock,
            categories,
            average_price,
            highest_priced_product: sorted_by_price.last().map(|p| (*p).clone()),
            lowest_priced_product: sorted_by_price.first().map(|p| (*p).clone()),
        }
    }
}

/// 各分类的产品数量，按分类首次出现的顺序序列化为 JSON 对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(Vec<(String, usize)>);

impl CategoryCounts {
    fn increment(&mut self, category: &str) {
        match self.0.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.0.push((category.to_string(), 1)),
        }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// 整数值输出为 `1200` 而非 `1200.0`
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_optional_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_number(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// 启动时预置的五条产品记录
pub fn seed_products() -> Vec<Product> {
    let seed = [
        ("1", "Laptop", "High-performance laptop with 16GB RAM", 1200.0, "electronics", true),
        ("2", "Smartphone", "Latest model with 128GB storage", 800.0, "electronics", true),
        ("3", "Coffee Maker", "Programmable coffee maker with timer", 50.0, "kitchen", false),
        ("4", "Desk Chair", "Ergonomic office chair with lumbar support", 150.0, "furniture", true),
        ("5", "Wireless Headphones", "Noise-cancelling Bluetooth headphones", 200.0, "electronics", true),
    ];

    seed.into_iter()
        .map(|(id, name, description, price, category, in_stock)| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            in_stock,
        })
        .collect()
}
