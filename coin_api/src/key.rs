// Cache keys. One key per upstream request shape.

pub fn coins_key(page: u32, per_page: u32) -> String {
	format!("coins_{}_{}", page, per_page)
}

pub fn coin_key(id: &str) -> String {
	format!("coin_{}", id)
}

pub fn chart_key(id: &str, days: u32) -> String {
	format!("chart_{}_{}", id, days)
}
