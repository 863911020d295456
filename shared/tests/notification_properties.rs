use proptest::prelude::*;
use shared::{Notification, NotificationInbox, NotificationType};

fn inbox_from(flags: &[bool]) -> NotificationInbox {
    NotificationInbox::new(
        flags
            .iter()
            .enumerate()
            .map(|(i, &is_read)| Notification {
                public_id: format!("n-{}", i),
                message: format!("notification {}", i),
                created_date: "2025-01-01T00:00:00".to_string(),
                notification_type: NotificationType::System,
                is_read,
            })
            .collect(),
    )
}

proptest! {
    #[test]
    fn marking_one_leaves_the_rest_untouched(
        flags in proptest::collection::vec(any::<bool>(), 1..60),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut inbox = inbox_from(&flags);
        let target = pick.index(flags.len());
        let id = format!("n-{}", target);
        let before = inbox.unread_count();

        let changed = inbox.mark_as_read(&id);

        prop_assert_eq!(changed, !flags[target]);
        for (i, notification) in inbox.notifications().iter().enumerate() {
            if i == target {
                prop_assert!(notification.is_read);
            } else {
                prop_assert_eq!(notification.is_read, flags[i]);
            }
        }
        prop_assert_eq!(inbox.unread_count(), before - usize::from(changed));
    }

    #[test]
    fn mark_all_leaves_nothing_unread(flags in proptest::collection::vec(any::<bool>(), 0..60)) {
        let mut inbox = inbox_from(&flags);
        let unread = flags.iter().filter(|r| !**r).count();

        prop_assert_eq!(inbox.mark_all_as_read(), unread);
        prop_assert_eq!(inbox.unread_count(), 0);
        prop_assert!(inbox.notifications().iter().all(|n| n.is_read));
    }

    #[test]
    fn read_flags_never_revert(
        flags in proptest::collection::vec(any::<bool>(), 1..40),
        ops in proptest::collection::vec(0_usize..40, 0..40),
    ) {
        let mut inbox = inbox_from(&flags);
        for op in ops {
            let snapshot: Vec<bool> = inbox.notifications().iter().map(|n| n.is_read).collect();
            inbox.mark_as_read(&format!("n-{}", op));
            for (was, now) in snapshot.iter().zip(inbox.notifications().iter()) {
                prop_assert!(!*was || now.is_read);
            }
        }
    }
}
