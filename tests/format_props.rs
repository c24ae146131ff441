use proptest::prelude::*;
use sysdash::format::format_bytes;
use sysdash::system::UsageStat;

const GIB: u64 = 1024 * 1024 * 1024;

fn decimals(formatted: &str) -> usize {
    let number = formatted.split(' ').next().unwrap_or_default();
    number.split('.').nth(1).map(str::len).unwrap_or(0)
}

#[test]
fn documented_examples() {
    assert_eq!(format_bytes(0), "0.00 MB");
    assert_eq!(format_bytes(GIB), "1.00 GB");
    assert_eq!(format_bytes(1536 * 1024 * 1024), "1.50 GB");
}

proptest! {
    #[test]
    fn unit_depends_only_on_gibibyte_threshold(bytes in any::<u64>()) {
        let formatted = format_bytes(bytes);
        if bytes >= GIB {
            prop_assert!(formatted.ends_with(" GB"), "{}", formatted);
        } else {
            prop_assert!(formatted.ends_with(" MB"), "{}", formatted);
        }
        prop_assert_eq!(decimals(&formatted), 2);
    }

    #[test]
    fn usage_stat_is_always_consistent(used in any::<u64>(), total in any::<u64>()) {
        let stat = UsageStat::from_used_total(used, total);
        prop_assert!(stat.used_bytes <= stat.total_bytes);
        prop_assert!((0.0..=100.0).contains(&stat.percent));
    }
}
