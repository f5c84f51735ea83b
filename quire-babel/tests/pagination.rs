use proptest::prelude::*;
use quire_babel::pagination::{page_count, paginate, visible_slice};

#[test]
fn empty_content_is_one_page() {
    assert_eq!(paginate(0.0, 684.0), vec![0.0]);
}

#[test]
fn exact_multiple_does_not_add_a_page() {
    assert_eq!(paginate(1368.0, 684.0), vec![0.0, 684.0]);
    assert_eq!(paginate(1368.5, 684.0), vec![0.0, 684.0, 1368.0]);
}

#[test]
fn degenerate_page_height_is_one_page() {
    assert_eq!(paginate(500.0, 0.0), vec![0.0]);
    assert_eq!(paginate(500.0, -10.0), vec![0.0]);
    assert_eq!(paginate(500.0, f64::NAN), vec![0.0]);
}

proptest! {
    #[test]
    fn offsets_step_by_page_height(total in 0.0f64..50_000.0, page in 1.0f64..2_000.0) {
        let offsets = paginate(total, page);

        let expected = ((total / page).ceil() as usize).max(1);
        prop_assert_eq!(offsets.len(), expected);
        prop_assert_eq!(page_count(total, page), expected);
        prop_assert_eq!(offsets[0], 0.0);
        for pair in offsets.windows(2) {
            prop_assert!((pair[1] - pair[0] - page).abs() < 1e-6);
        }
        for offset in &offsets {
            prop_assert!(*offset < total.max(page));
        }
    }

    #[test]
    fn spans_are_split_without_loss(
        page in 10.0f64..2_000.0,
        top_frac in 0.0f64..1.0,
        height in 0.1f64..5_000.0,
    ) {
        let total = 20_000.0;
        let top = (total - height) * top_frac;
        let offsets = paginate(total, page);

        let mut covered = 0.0;
        for offset in &offsets {
            if let Some((start, visible)) = visible_slice(top, height, *offset, page) {
                prop_assert!(start >= *offset);
                prop_assert!(start + visible <= offset + page + 1e-9);
                covered += visible;
            }
        }
        prop_assert!((covered - height).abs() < 1e-6);
    }
}
