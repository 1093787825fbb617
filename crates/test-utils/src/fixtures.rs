//! Shared subgraph schema fixtures.
//!
//! Prefer an inline schema when the exact SDL is what the test is about.
//! These are for tests that need a realistic schema with a known shape.

/// Two types, only one of which is an entity.
///
/// `Token` has two stored fields; `Transfer` has no `@entity` marker and must
/// not show up in generated documentation.
pub const ERC20_SCHEMA: &str = r"
type Token @entity {
  id: ID!
  balance: BigInt!
}

type Transfer {
  id: ID!
  from: Token!
  amount: BigInt!
}
";

/// Exchange-style subgraph exercising every extraction rule.
///
/// Entities, in order: `Factory` (3 fields), `Token` (4 stored, 2 derived),
/// `Pair` (6 stored, 1 derived, one linked list field), `Swap` (immutable,
/// 4 fields), `PairHourData` (3 fields). Also contains block and inline
/// descriptions, `#` comments, a non-entity type and an enum.
pub const DEX_SCHEMA: &str = r#"
"""
Aggregate data for the whole exchange.
"""
type Factory @entity {
  id: ID!
  "number of pairs created"
  pairCount: Int!
  totalVolumeUSD: BigDecimal!
}

# Tokens traded on the exchange
type Token @entity {
  id: ID!
  symbol: String!
  name: String!
  decimals: BigInt!
  pairBase: [Pair!]! @derivedFrom(field: "token0")
  pairQuote: [Pair!]! @derivedFrom(field: "token1")
}

type Pair @entity {
  id: ID!
  token0: Token!
  token1: Token!
  reserve0: BigDecimal!
  reserve1: BigDecimal!
  # relationships
  swaps: [Swap!]! @derivedFrom(field: "pair")
  hourData: [PairHourData!]
}

type Swap @entity(immutable: true) {
  id: ID!
  pair: Pair!
  sender: Bytes!
  amountUSD: BigDecimal!
}

type PairHourData @entity {
  id: ID!
  pair: Pair!
  hourStartUnix: Int!
}

"""
Not stored; used by the mappings for bookkeeping.
"""
type Bundle {
  id: ID!
  ethPrice: BigDecimal!
}

enum Side {
  BUY
  SELL
}
"#;

/// Entity names of [`DEX_SCHEMA`] in declaration order.
pub const DEX_ENTITIES: &[&str] = &["Factory", "Token", "Pair", "Swap", "PairHourData"];

/// An entity whose field block never closes.
pub const UNCLOSED_SCHEMA: &str = r"
type Account @entity {
  id: ID!
  balance: BigInt!
";
