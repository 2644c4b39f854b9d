// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Profile surcharge rules. Every profile shares one pricing skeleton and
// differs only in the rule below.

use glyphquote_core::types::ProfileKind;

/// Which request field a size-based surcharge reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    /// Letter thickness, sent as `thickness_pricing`.
    Thickness,
    /// Backing panel size, sent as `plexi_size`.
    PanelSize,
}

impl SizeField {
    /// JSON key in the pricing payload.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Thickness => "thickness_pricing",
            Self::PanelSize => "plexi_size",
        }
    }
}

/// Secondary surcharge applied on top of the width-adjusted base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurchargeRule {
    None,
    BySize {
        field: SizeField,
        default_size: i64,
        /// `(size, percentage of base price)`; unlisted sizes add nothing.
        table: &'static [(i64, f64)],
    },
}

const THICKNESS_PCT: &[(i64, f64)] = &[(3, 0.0), (5, 10.0), (8, 15.0), (20, 20.0)];
const LUX_PANEL_PCT: &[(i64, f64)] = &[(10, 0.0), (20, 30.0), (30, 45.0)];
const PANEL_PCT: &[(i64, f64)] = &[(3, 0.0), (5, 10.0), (10, 15.0)];

impl SurchargeRule {
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::AluminiumDoosletter => Self::BySize {
                field: SizeField::Thickness,
                default_size: 3,
                table: THICKNESS_PCT,
            },
            ProfileKind::Profiel2 => Self::None,
            ProfileKind::Profiel3Lux => Self::BySize {
                field: SizeField::PanelSize,
                default_size: 10,
                table: LUX_PANEL_PCT,
            },
            ProfileKind::Profiel4 => Self::BySize {
                field: SizeField::PanelSize,
                default_size: 3,
                table: PANEL_PCT,
            },
        }
    }

    /// Surcharge percentage for `size`.
    pub fn percent(&self, size: i64) -> f64 {
        match self {
            Self::None => 0.0,
            Self::BySize { table, .. } => table
                .iter()
                .find(|(s, _)| *s == size)
                .map_or(0.0, |(_, pct)| *pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thickness_table() {
        let rule = SurchargeRule::for_kind(ProfileKind::AluminiumDoosletter);
        assert_eq!(rule.percent(3), 0.0);
        assert_eq!(rule.percent(5), 10.0);
        assert_eq!(rule.percent(8), 15.0);
        assert_eq!(rule.percent(20), 20.0);
        assert_eq!(rule.percent(4), 0.0);
    }

    #[test]
    fn panel_tables_differ_by_profile() {
        let lux = SurchargeRule::for_kind(ProfileKind::Profiel3Lux);
        let plain = SurchargeRule::for_kind(ProfileKind::Profiel4);
        assert_eq!(lux.percent(10), 0.0);
        assert_eq!(lux.percent(30), 45.0);
        assert_eq!(plain.percent(10), 15.0);
        assert_eq!(plain.percent(30), 0.0);
    }

    #[test]
    fn profile_two_has_no_surcharge() {
        let rule = SurchargeRule::for_kind(ProfileKind::Profiel2);
        assert_eq!(rule, SurchargeRule::None);
        assert_eq!(rule.percent(20), 0.0);
    }
}
