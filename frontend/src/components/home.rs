//! 店面首页：按会话角色分流到买家/卖家视图
//!
//! 同时承载两个视图共用的列表逻辑（默认排序、三态价格排序、标题搜索），
//! 这些是纯函数，可在原生环境直接测试。

use crate::auth::use_auth;
use crate::components::home_buyer::BuyerHome;
use crate::components::home_seller::SellerHome;
use bluecart_shared::{Product, Role};
use leptos::prelude::*;

/// 价格排序的三态循环：默认(最新在前) -> 最高价 -> 最低价
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Default,
    Desc,
    Asc,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Default => SortMode::Desc,
            SortMode::Desc => SortMode::Asc,
            SortMode::Asc => SortMode::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Default => "Default",
            SortMode::Desc => "Highest",
            SortMode::Asc => "Lowest",
        }
    }

    /// 在默认顺序的副本上应用当前排序
    pub fn apply(self, default_order: &[Product]) -> Vec<Product> {
        let mut list = default_order.to_vec();
        match self {
            SortMode::Default => {}
            SortMode::Desc => list.sort_by(|a, b| b.price.cmp(&a.price)),
            SortMode::Asc => list.sort_by(|a, b| a.price.cmp(&b.price)),
        }
        list
    }
}

/// 列表默认顺序：id 降序，最新商品在前
pub fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| b.id.cmp(&a.id));
    products
}

/// 标题子串搜索，大小写不敏感；空查询返回全部
pub fn filter_by_title(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    move || match auth.role() {
        Some(Role::Seller) => view! { <SellerHome /> }.into_any(),
        Some(Role::Buyer) => view! { <BuyerHome /> }.into_any(),
        None => view! { <p class="p-4">"Loading..."</p> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, title: &str, price: i64) -> Product {
        Product {
            id,
            title: title.to_string(),
            category: "misc".to_string(),
            price,
            description: String::new(),
            image_url: String::new(),
            quantity: 1,
        }
    }

    #[test]
    fn test_sort_mode_cycles_through_three_states() {
        let m = SortMode::Default;
        assert_eq!(m.next(), SortMode::Desc);
        assert_eq!(m.next().next(), SortMode::Asc);
        assert_eq!(m.next().next().next(), SortMode::Default);
    }

    #[test]
    fn test_sort_labels() {
        assert_eq!(SortMode::Default.label(), "Default");
        assert_eq!(SortMode::Desc.label(), "Highest");
        assert_eq!(SortMode::Asc.label(), "Lowest");
    }

    #[test]
    fn test_newest_first_orders_by_id_descending() {
        let sorted = newest_first(vec![product(1, "a", 10), product(3, "b", 5), product(2, "c", 7)]);
        let ids: Vec<u64> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_price_sort_preserves_default_on_reset() {
        let base = vec![product(3, "a", 10), product(2, "b", 30), product(1, "c", 20)];

        let desc: Vec<i64> = SortMode::Desc.apply(&base).iter().map(|p| p.price).collect();
        assert_eq!(desc, vec![30, 20, 10]);

        let asc: Vec<i64> = SortMode::Asc.apply(&base).iter().map(|p| p.price).collect();
        assert_eq!(asc, vec![10, 20, 30]);

        // 回到默认：按原始顺序，而不是上一次排序的结果
        let ids: Vec<u64> = SortMode::Default.apply(&base).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_title_filter_is_case_insensitive() {
        let base = vec![product(1, "Blue Mug", 10), product(2, "Red Cup", 5)];
        let hits = filter_by_title(&base, "blue");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(filter_by_title(&base, "").len(), 2);
        assert!(filter_by_title(&base, "green").is_empty());
    }
}
