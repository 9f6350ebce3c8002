use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The recognised kinds of promotional reprint a card print can be a
/// variant of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantType {
    TheList,
    PrereleaseStamped,
    PromopackStamped,
}

impl VariantType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TheList => "the_list",
            Self::PrereleaseStamped => "prerelease_stamped",
            Self::PromopackStamped => "promopack_stamped",
        }
    }
}

impl FromStr for VariantType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "the_list" => Ok(Self::TheList),
            "prerelease_stamped" => Ok(Self::PrereleaseStamped),
            "promopack_stamped" => Ok(Self::PromopackStamped),
            other => Err(format!("unknown variant type {other:?}")),
        }
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A promotional reprint linked to the original card it reproduces.
/// At most one variant of a given type exists per original.
#[derive(Debug, Clone, PartialEq)]
pub struct CardVariant {
    pub id: Uuid,
    pub original: Uuid,
    pub variant_type: VariantType,
}

impl CardVariant {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            original: Uuid::nil(),
            variant_type: VariantType::TheList,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_type_round_trip() {
        for vt in [
            VariantType::TheList,
            VariantType::PrereleaseStamped,
            VariantType::PromopackStamped,
        ] {
            assert_eq!(vt.as_str().parse::<VariantType>().unwrap(), vt);
        }
    }

    #[test]
    fn test_unknown_variant_type_rejected() {
        assert!("retro_frame".parse::<VariantType>().is_err());
    }
}
