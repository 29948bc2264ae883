use schema::Ailment;

use crate::battle::state::CaptureBand;

/// Extra catch rate for a disabled target.
pub fn ailment_bonus(ailment: Option<Ailment>) -> f64 {
    match ailment {
        Some(Ailment::Asleep) | Some(Ailment::Buried) => 10.0,
        Some(Ailment::Shocked) => 5.0,
        _ => 0.0,
    }
}

/// Acceptance threshold on a 0..100 roll.
///
/// `rate = catch_rate + ailment bonus`, then the missing health pulls the
/// threshold toward 100: `rate + (100 - rate) * (1 - health_fraction)^2`.
pub fn capture_threshold(catch_rate: u8, ailment: Option<Ailment>, health_fraction: f64) -> f64 {
    let rate = (catch_rate as f64 + ailment_bonus(ailment)).min(100.0);
    let missing = 1.0 - health_fraction.clamp(0.0, 1.0);
    rate + (100.0 - rate) * missing * missing
}

/// Maps one roll onto the result bands. The roll is compared as `roll`,
/// `roll - 10` and `roll - 20`, so each miss band is ten points wide.
pub fn capture_band(threshold: f64, roll: u32) -> CaptureBand {
    let roll = roll as f64;
    if roll < threshold {
        CaptureBand::Success
    } else if roll - 10.0 < threshold {
        CaptureBand::BrokeFree
    } else if roll - 20.0 < threshold {
        CaptureBand::Failed
    } else {
        CaptureBand::GotAway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_threshold_for_weakened_target() {
        // 50 max health, 10 remaining, rate 40.
        let threshold = capture_threshold(40, None, 10.0 / 50.0);
        assert!((threshold - 78.4).abs() < 1e-9, "{}", threshold);
        assert_eq!(capture_band(threshold, 70), CaptureBand::Success);
        assert_eq!(capture_band(threshold, 90), CaptureBand::Failed);
    }

    #[rstest]
    #[case(None, 0.0, "no ailment")]
    #[case(Some(Ailment::Poisoned), 0.0, "poison gives nothing")]
    #[case(Some(Ailment::Aflame), 0.0, "fire gives nothing")]
    #[case(Some(Ailment::Shocked), 5.0, "shock")]
    #[case(Some(Ailment::Asleep), 10.0, "sleep")]
    #[case(Some(Ailment::Buried), 10.0, "buried")]
    fn test_ailment_bonus(#[case] ailment: Option<Ailment>, #[case] bonus: f64, #[case] desc: &str) {
        assert_eq!(ailment_bonus(ailment), bonus, "{}", desc);
    }

    #[test]
    fn test_full_health_uses_rate_only() {
        assert_eq!(capture_threshold(30, Some(Ailment::Asleep), 1.0), 40.0);
        // Nearly dead targets approach certainty.
        assert_eq!(capture_threshold(0, None, 0.0), 100.0);
    }

    #[rstest]
    #[case(49, CaptureBand::Success)]
    #[case(50, CaptureBand::BrokeFree)]
    #[case(59, CaptureBand::BrokeFree)]
    #[case(60, CaptureBand::Failed)]
    #[case(69, CaptureBand::Failed)]
    #[case(70, CaptureBand::GotAway)]
    fn test_bands_are_ten_points_wide(#[case] roll: u32, #[case] band: CaptureBand) {
        assert_eq!(capture_band(50.0, roll), band);
    }
}
