//! Equality/hash strategy selection
//!
//! Generated types override `hashCode`/`equals` per member. Which expression
//! is correct depends only on the target shape type, whether the resolved
//! symbol is nullable, and whether a blob is streaming. [`select_strategy`]
//! is the whole decision table; everything else just renders its result.
//!
//! | target            | nullable | streaming | strategy                     |
//! |-------------------|----------|-----------|------------------------------|
//! | integer, intEnum  | yes      |           | [`NullCoalescingNumeric`]    |
//! | integer, intEnum  | no       |           | [`DirectNumeric`]            |
//! | byte, short       | yes      |           | [`WidenedNullCoalescing`]    |
//! | byte, short       | no       |           | [`Widened`]                  |
//! | blob              |          | yes       | [`Identity`]                 |
//! | blob              |          | no        | [`Content`]                  |
//! | anything else     | yes      |           | [`NullCoalescingStructural`] |
//! | anything else     | no       |           | [`Structural`]               |
//!
//! [`NullCoalescingNumeric`]: HashStrategy::NullCoalescingNumeric
//! [`DirectNumeric`]: HashStrategy::DirectNumeric
//! [`WidenedNullCoalescing`]: HashStrategy::WidenedNullCoalescing
//! [`Widened`]: HashStrategy::Widened
//! [`Identity`]: HashStrategy::Identity
//! [`Content`]: HashStrategy::Content
//! [`NullCoalescingStructural`]: HashStrategy::NullCoalescingStructural
//! [`Structural`]: HashStrategy::Structural

use smithy_sdk_generator_common::ShapeType;

/// How a single value participates in `hashCode`/`equals`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashStrategy {
    /// `value ?: 0`
    NullCoalescingNumeric,
    /// `value`
    DirectNumeric,
    /// `value?.toInt() ?: 0`
    WidenedNullCoalescing,
    /// `value.toInt()`
    Widened,
    /// Streaming blobs compare and hash by reference.
    ///
    /// A stream cannot be read twice, so two streams carrying the same bytes
    /// are still unequal. This is a known limitation of generated types that
    /// hold streaming payloads.
    Identity,
    /// Byte-for-byte comparison of non-streaming blobs
    Content,
    /// `value?.hashCode() ?: 0`
    NullCoalescingStructural,
    /// `value.hashCode()`
    Structural,
}

impl HashStrategy {
    /// True when the default data-class comparison is wrong for this value.
    ///
    /// Only non-streaming blobs qualify: arrays compare by reference unless
    /// told otherwise, while a stream's default reference equality is
    /// already what [`Identity`](HashStrategy::Identity) asks for.
    pub fn requires_custom_equality(&self) -> bool {
        matches!(self, HashStrategy::Content)
    }

    /// True when equality compares contents rather than references
    pub fn is_content_based(&self) -> bool {
        !matches!(self, HashStrategy::Identity)
    }
}

/// A selected strategy plus the nullability it was selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyFragment {
    pub strategy: HashStrategy,
    pub nullable: bool,
}

impl StrategyFragment {
    /// `Int`-typed hash expression for `value`
    pub fn hash_expr(&self, value: &str) -> String {
        match (self.strategy, self.nullable) {
            (HashStrategy::NullCoalescingNumeric, _) => format!("{} ?: 0", value),
            (HashStrategy::DirectNumeric, _) => value.to_string(),
            (HashStrategy::WidenedNullCoalescing, _) => format!("{}?.toInt() ?: 0", value),
            (HashStrategy::Widened, _) => format!("{}.toInt()", value),
            (HashStrategy::Identity, true) => format!("{}?.hashCode() ?: 0", value),
            (HashStrategy::Identity, false) => format!("{}.hashCode()", value),
            (HashStrategy::Content, true) => format!("{}?.contentHashCode() ?: 0", value),
            (HashStrategy::Content, false) => format!("{}.contentHashCode()", value),
            (HashStrategy::NullCoalescingStructural, _) => format!("{}?.hashCode() ?: 0", value),
            (HashStrategy::Structural, _) => format!("{}.hashCode()", value),
        }
    }

    /// Boolean expression that is true when `lhs` and `rhs` are equal
    pub fn equals_expr(&self, lhs: &str, rhs: &str) -> String {
        match self.strategy {
            // Kotlin's nullable receiver overload handles null on either side
            HashStrategy::Content => format!("{}.contentEquals({})", lhs, rhs),
            HashStrategy::Identity => format!("{} === {}", lhs, rhs),
            _ => format!("{} == {}", lhs, rhs),
        }
    }

    /// Boolean expression that is true when `lhs` and `rhs` differ
    pub fn not_equals_expr(&self, lhs: &str, rhs: &str) -> String {
        match self.strategy {
            HashStrategy::Content => format!("!{}.contentEquals({})", lhs, rhs),
            HashStrategy::Identity => format!("{} !== {}", lhs, rhs),
            _ => format!("{} != {}", lhs, rhs),
        }
    }

    pub fn requires_custom_equality(&self) -> bool {
        self.strategy.requires_custom_equality()
    }
}

/// Pick the hash/equality strategy for a value.
///
/// `streaming_blob` is only consulted for blob targets.
pub fn select_strategy(
    target: ShapeType,
    nullable: bool,
    streaming_blob: bool,
) -> StrategyFragment {
    let strategy = match target {
        ShapeType::Integer | ShapeType::IntEnum => {
            if nullable {
                HashStrategy::NullCoalescingNumeric
            } else {
                HashStrategy::DirectNumeric
            }
        }
        ShapeType::Byte | ShapeType::Short => {
            if nullable {
                HashStrategy::WidenedNullCoalescing
            } else {
                HashStrategy::Widened
            }
        }
        ShapeType::Blob => {
            if streaming_blob {
                HashStrategy::Identity
            } else {
                HashStrategy::Content
            }
        }
        // `Long`, `Float` and `Double` are not `Int` and must go through
        // `hashCode()`. Collections and documents already have structural
        // equality. Service shapes never appear as member targets.
        ShapeType::Boolean
        | ShapeType::Long
        | ShapeType::Float
        | ShapeType::Double
        | ShapeType::BigInteger
        | ShapeType::BigDecimal
        | ShapeType::String
        | ShapeType::Timestamp
        | ShapeType::Document
        | ShapeType::Enum
        | ShapeType::List
        | ShapeType::Map
        | ShapeType::Structure
        | ShapeType::Union
        | ShapeType::Service
        | ShapeType::Operation
        | ShapeType::Resource
        | ShapeType::Member => {
            if nullable {
                HashStrategy::NullCoalescingStructural
            } else {
                HashStrategy::Structural
            }
        }
    };

    StrategyFragment { strategy, nullable }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_rows() {
        let nullable = select_strategy(ShapeType::Integer, true, false);
        assert_eq!(nullable.strategy, HashStrategy::NullCoalescingNumeric);
        assert_eq!(nullable.hash_expr("value"), "value ?: 0");

        let direct = select_strategy(ShapeType::Integer, false, false);
        assert_eq!(direct.strategy, HashStrategy::DirectNumeric);
        assert_eq!(direct.hash_expr("value"), "value");
    }

    #[test]
    fn test_byte_rows_widen() {
        let nullable = select_strategy(ShapeType::Byte, true, false);
        assert_eq!(nullable.strategy, HashStrategy::WidenedNullCoalescing);
        assert_eq!(nullable.hash_expr("level"), "level?.toInt() ?: 0");

        let direct = select_strategy(ShapeType::Byte, false, false);
        assert_eq!(direct.strategy, HashStrategy::Widened);
        assert_eq!(direct.hash_expr("level"), "level.toInt()");
    }

    #[test]
    fn test_streaming_blob_is_identity_based() {
        for nullable in [true, false] {
            let fragment = select_strategy(ShapeType::Blob, nullable, true);
            assert_eq!(fragment.strategy, HashStrategy::Identity);
            assert!(!fragment.strategy.is_content_based());
            assert_eq!(fragment.equals_expr("value", "other.value"), "value === other.value");
            assert!(!fragment.hash_expr("value").contains("contentHashCode"));
        }
    }

    #[test]
    fn test_blob_is_content_based() {
        for nullable in [true, false] {
            let fragment = select_strategy(ShapeType::Blob, nullable, false);
            assert_eq!(fragment.strategy, HashStrategy::Content);
            assert!(fragment.requires_custom_equality());
            assert_eq!(
                fragment.equals_expr("value", "other.value"),
                "value.contentEquals(other.value)"
            );
            assert_eq!(
                fragment.not_equals_expr("value", "other.value"),
                "!value.contentEquals(other.value)"
            );
        }
        assert_eq!(
            select_strategy(ShapeType::Blob, true, false).hash_expr("value"),
            "value?.contentHashCode() ?: 0"
        );
        assert_eq!(
            select_strategy(ShapeType::Blob, false, false).hash_expr("value"),
            "value.contentHashCode()"
        );
    }

    #[test]
    fn test_streaming_flag_ignored_for_non_blobs() {
        assert_eq!(
            select_strategy(ShapeType::Integer, true, true).strategy,
            HashStrategy::NullCoalescingNumeric
        );
        assert_eq!(
            select_strategy(ShapeType::Union, false, true).strategy,
            HashStrategy::Structural
        );
    }

    #[test]
    fn test_structural_fallback() {
        let others = [
            ShapeType::Boolean,
            ShapeType::Long,
            ShapeType::Float,
            ShapeType::Double,
            ShapeType::BigInteger,
            ShapeType::BigDecimal,
            ShapeType::String,
            ShapeType::Timestamp,
            ShapeType::Document,
            ShapeType::Enum,
            ShapeType::List,
            ShapeType::Map,
            ShapeType::Structure,
            ShapeType::Union,
        ];
        for ty in others {
            let nullable = select_strategy(ty, true, false);
            assert_eq!(nullable.strategy, HashStrategy::NullCoalescingStructural, "{}", ty);
            assert_eq!(nullable.hash_expr("v"), "v?.hashCode() ?: 0");
            assert!(!nullable.requires_custom_equality());

            let direct = select_strategy(ty, false, false);
            assert_eq!(direct.strategy, HashStrategy::Structural, "{}", ty);
            assert_eq!(direct.hash_expr("v"), "v.hashCode()");
            assert_eq!(direct.equals_expr("v", "o.v"), "v == o.v");
        }
    }

    #[test]
    fn test_only_content_blobs_need_custom_equality() {
        assert!(HashStrategy::Content.requires_custom_equality());
        assert!(!HashStrategy::Identity.requires_custom_equality());
        assert!(!HashStrategy::DirectNumeric.requires_custom_equality());
        assert!(!HashStrategy::Widened.requires_custom_equality());
        assert!(!HashStrategy::Structural.requires_custom_equality());
    }
}
