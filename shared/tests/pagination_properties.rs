use proptest::prelude::*;
use proptest::test_runner::Config;
use shared::pagination::{PaginationWindow, PAGE_NUMBER_WINDOW};

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn page_count_is_ceiling_division(total in 0_usize..5_000, page_size in 1_usize..200) {
        let window = PaginationWindow::new(1, page_size, total);
        prop_assert_eq!(window.total_pages(), (total + page_size - 1) / page_size);
    }

    #[test]
    fn pages_never_exceed_page_size_and_cover_everything(total in 0_usize..600, page_size in 1_usize..50) {
        let items: Vec<usize> = (0..total).collect();
        let first = PaginationWindow::new(1, page_size, total);
        let mut seen = Vec::new();
        for page in 1..=first.total_pages() {
            let slice = first.go_to(page).slice(&items);
            prop_assert!(slice.len() <= page_size);
            prop_assert!(!slice.is_empty());
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, items);
    }

    #[test]
    fn page_number_window_contains_current_and_stays_in_range(
        total_pages in 1_usize..300,
        current_seed in 0_usize..300,
    ) {
        let current = current_seed % total_pages + 1;
        let window = PaginationWindow::new(current, 1, total_pages);
        let numbers = window.page_numbers();

        prop_assert!(numbers.contains(&current));
        prop_assert!(numbers.len() <= PAGE_NUMBER_WINDOW);
        prop_assert_eq!(numbers.len(), total_pages.min(PAGE_NUMBER_WINDOW));
        prop_assert!(numbers.iter().all(|&n| n >= 1 && n <= total_pages));
        prop_assert!(numbers.windows(2).all(|w| w[1] == w[0] + 1));
    }
}

#[test]
fn twelve_notifications_scenario() {
    let window = PaginationWindow::new(2, 5, 12);
    assert_eq!(window.total_pages(), 3);
    assert_eq!(window.page_numbers(), vec![1, 2, 3]);

    let ten_pages = PaginationWindow::new(8, 1, 10);
    assert_eq!(ten_pages.page_numbers(), vec![6, 7, 8, 9, 10]);
}
