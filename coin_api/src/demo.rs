use crate::api_types::Coin;

/// Fallback for the coin list when the provider is rate limited or unreachable.
pub fn demo_coins() -> Vec<Coin> {
	vec![
		Coin {
			id: "bitcoin".to_string(),
			symbol: "btc".to_string(),
			name: "Bitcoin".to_string(),
			image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png?1547033579".to_string(),
			current_price: Some(27150.0),
			price_change_percentage_24h: Some(1.31),
			market_cap: Some(528_000_000_000.0),
			total_volume: Some(12_000_000_000.0),
		},
		Coin {
			id: "ethereum".to_string(),
			symbol: "eth".to_string(),
			name: "Ethereum".to_string(),
			image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png?1595348880".to_string(),
			current_price: Some(1680.0),
			price_change_percentage_24h: Some(-1.18),
			market_cap: Some(202_000_000_000.0),
			total_volume: Some(6_500_000_000.0),
		},
		Coin {
			id: "cardano".to_string(),
			symbol: "ada".to_string(),
			name: "Cardano".to_string(),
			image: "https://assets.coingecko.com/coins/images/975/large/cardano.png?1547034860".to_string(),
			current_price: Some(0.25),
			price_change_percentage_24h: Some(2.04),
			market_cap: Some(8_900_000_000.0),
			total_volume: Some(250_000_000.0),
		},
	]
}
