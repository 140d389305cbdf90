//! 产品请求体校验
//!
//! 所有规则独立执行，错误会累积而不是在第一条失败时返回。

use serde_json::Value;

use super::model::ProductInput;

pub const NAME_ERROR: &str = "Name is required and must be a non-empty string";
pub const DESCRIPTION_ERROR: &str = "Description is required and must be a non-empty string";
pub const PRICE_ERROR: &str = "Price is required and must be a non-negative number";
pub const CATEGORY_ERROR: &str = "Category is required and must be a non-empty string";
pub const IN_STOCK_ERROR: &str = "inStock is required and must be a boolean";

/// 返回全部校验错误，空列表表示通过
pub fn validate(payload: &Value) -> Vec<String> {
    match ProductInput::from_payload(payload) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    }
}

fn non_empty_string(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ProductInput {
    /// 将任意 JSON 值转换为已校验且去除空白的产品字段
    pub fn from_payload(payload: &Value) -> Result<Self, Vec<String>> {
        let mut errors = Vec::new();

        let name = non_empty_string(payload, "name");
        if name.is_none() {
            errors.push(NAME_ERROR.to_string());
        }

        let description = non_empty_string(payload, "description");
        if description.is_none() {
            errors.push(DESCRIPTION_ERROR.to_string());
        }

        let price = payload
            .get("price")
            .and_then(Value::as_f64)
            .filter(|price| *price >= 0.0);
        if price.is_none() {
            errors.push(PRICE_ERROR.to_string());
        }

        let category = non_empty_string(payload, "category");
        if category.is_none() {
            errors.push(CATEGORY_ERROR.to_string());
        }

        let in_stock = payload.get("inStock").and_then(Value::as_bool);
        if in_stock.is_none() {
            errors.push(IN_STOCK_ERROR.to_string());
        }

        match (name, description, price, category, in_stock) {
            (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) => {
                Ok(Self {
                    name,
                    description,
                    price,
                    category,
                    in_stock,
                })
            }
            _ => Err(errors),
        }
    }
}
