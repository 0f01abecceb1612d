//! Channel behaviour tests: ordering, re-entrancy, and teardown order

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, Rc<RefCell<Vec<&'static str>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    (Rc::clone(&log), log)
}

#[test]
fn test_callbacks_fire_in_subscription_order() {
    let publisher = Publisher::<i32>::new();
    let (log, sink) = recorder();

    let a = Rc::clone(&sink);
    let _a = publisher.subscribe(move |_| a.borrow_mut().push("a"));
    let b = Rc::clone(&sink);
    let _b = publisher.subscribe(move |_| b.borrow_mut().push("b"));
    let c = Rc::clone(&sink);
    let _c = publisher.subscribe(move |_| c.borrow_mut().push("c"));

    publisher.notify(&7);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_callback_receives_argument() {
    let publisher = Publisher::<str>::new();
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);
    let _sub = publisher.subscribe(move |text: &str| sink.borrow_mut().push_str(text));

    publisher.notify("saved");
    assert_eq!(*seen.borrow(), "saved");
}

#[test]
fn test_drop_subscription_unsubscribes() {
    let publisher = Publisher::<()>::new();
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    let sub = publisher.subscribe(move |_| sink.set(sink.get() + 1));

    publisher.notify(&());
    assert_eq!(publisher.subscriber_count(), 1);

    drop(sub);
    publisher.notify(&());
    assert_eq!(count.get(), 1);
    assert_eq!(publisher.subscriber_count(), 0);
}

#[test]
fn test_identifiers_are_not_reused() {
    let publisher = Publisher::<()>::new();
    let first = publisher.subscribe(|_| {});
    let first_id = first.id();
    drop(first);

    let second = publisher.subscribe(|_| {});
    assert!(second.id() > first_id);
}

#[test]
fn test_empty_subscription_is_inert() {
    let sub = Subscription::empty();
    assert!(!sub.is_active());
    assert_eq!(sub.id(), None);
    drop(sub);
}

#[test]
fn test_overwriting_subscription_releases_previous() {
    let publisher = Publisher::<()>::new();
    let mut slot = publisher.subscribe(|_| {});
    assert!(slot.is_active());
    assert_eq!(publisher.subscriber_count(), 1);

    slot = publisher.subscribe(|_| {});
    assert_eq!(publisher.subscriber_count(), 1);
    assert!(slot.is_active());

    slot = Subscription::default();
    assert_eq!(publisher.subscriber_count(), 0);
    assert!(!slot.is_active());
}

#[test]
fn test_moved_subscription_keeps_registration() {
    let publisher = Publisher::<()>::new();
    let sub = publisher.subscribe(|_| {});
    let mut holder = Vec::new();
    holder.push(sub);
    assert_eq!(publisher.subscriber_count(), 1);

    holder.clear();
    assert_eq!(publisher.subscriber_count(), 0);
}

#[test]
fn test_subscription_outlives_publisher() {
    let publisher = Publisher::<()>::new();
    let subs: Vec<_> = (0..5).map(|_| publisher.subscribe(|_| {})).collect();
    assert!(subs.iter().all(Subscription::is_active));

    drop(publisher);
    assert!(subs.iter().all(|s| !s.is_active()));
    drop(subs);
}

#[test]
fn test_interleaved_teardown() {
    let publisher = Publisher::<()>::new();
    let mut subs: Vec<_> = (0..6).map(|_| publisher.subscribe(|_| {})).collect();

    subs.remove(4);
    subs.remove(1);
    assert_eq!(publisher.subscriber_count(), 4);

    subs.truncate(2);
    assert_eq!(publisher.subscriber_count(), 2);

    drop(publisher);
    drop(subs);
}

#[test]
fn test_callback_owning_subscription_to_its_own_publisher() {
    // Freeing the table drops the callback, which drops a subscription to
    // the publisher being destroyed.
    let publisher = Publisher::<()>::new();
    let inner = publisher.subscribe(|_| {});
    let _outer = publisher.subscribe(move |_| {
        let _keep = &inner;
    });

    drop(publisher);
}

#[test]
fn test_unsubscribe_releases_nested_subscription() {
    // Removing the outer callback drops `inner`, which detaches from the
    // same registry once the outer removal has released it.
    let publisher = Publisher::<()>::new();
    let inner = publisher.subscribe(|_| {});
    let inner_id = inner.id();
    let outer = publisher.subscribe(move |_| {
        let _keep = &inner;
    });
    assert_eq!(publisher.subscriber_count(), 2);

    outer.unsubscribe();
    assert_eq!(publisher.subscriber_count(), 0);
    assert!(inner_id.is_some());
}

#[test]
fn test_unsubscribe_self_during_notify() {
    let publisher = Publisher::<()>::new();
    let count = Rc::new(Cell::new(0));
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let sink = Rc::clone(&count);
    let own = Rc::clone(&slot);
    let sub = publisher.subscribe(move |_| {
        sink.set(sink.get() + 1);
        own.borrow_mut().take();
    });
    *slot.borrow_mut() = Some(sub);

    publisher.notify(&());
    publisher.notify(&());
    assert_eq!(count.get(), 1);
    assert_eq!(publisher.subscriber_count(), 0);
}

#[test]
fn test_unsubscribe_later_callback_during_notify_skips_it() {
    let publisher = Publisher::<()>::new();
    let (log, sink) = recorder();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let a = Rc::clone(&sink);
    let target = Rc::clone(&victim);
    let _a = publisher.subscribe(move |_| {
        a.borrow_mut().push("a");
        target.borrow_mut().take();
    });
    let b = Rc::clone(&sink);
    *victim.borrow_mut() = Some(publisher.subscribe(move |_| b.borrow_mut().push("b")));
    let c = Rc::clone(&sink);
    let _c = publisher.subscribe(move |_| c.borrow_mut().push("c"));

    publisher.notify(&());
    assert_eq!(*log.borrow(), vec!["a", "c"]);
}

#[test]
fn test_unsubscribe_earlier_callback_during_notify() {
    let publisher = Publisher::<()>::new();
    let (log, sink) = recorder();
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let a = Rc::clone(&sink);
    *victim.borrow_mut() = Some(publisher.subscribe(move |_| a.borrow_mut().push("a")));
    let b = Rc::clone(&sink);
    let target = Rc::clone(&victim);
    let _b = publisher.subscribe(move |_| {
        b.borrow_mut().push("b");
        target.borrow_mut().take();
    });

    publisher.notify(&());
    publisher.notify(&());
    assert_eq!(*log.borrow(), vec!["a", "b", "b"]);
}

#[test]
fn test_subscribe_during_notify_fires_next_pass() {
    let publisher = Rc::new(Publisher::<()>::new());
    let count = Rc::new(Cell::new(0));
    let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let weak = Rc::downgrade(&publisher);
    let sink = Rc::clone(&count);
    let store = Rc::clone(&added);
    let _spawner = publisher.subscribe(move |_| {
        if !store.borrow().is_empty() {
            return;
        }
        if let Some(publisher) = weak.upgrade() {
            let sink = Rc::clone(&sink);
            store
                .borrow_mut()
                .push(publisher.subscribe(move |_| sink.set(sink.get() + 1)));
        }
    });

    publisher.notify(&());
    assert_eq!(count.get(), 0, "new callback must not run in the same pass");
    assert_eq!(publisher.subscriber_count(), 2);

    publisher.notify(&());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_nested_notify_from_callback() {
    let publisher = Rc::new(Publisher::<u32>::new());
    let (log, sink) = recorder();

    let weak = Rc::downgrade(&publisher);
    let a = Rc::clone(&sink);
    let _a = publisher.subscribe(move |depth| {
        a.borrow_mut().push(if *depth == 0 { "outer" } else { "inner" });
        if *depth == 0 {
            if let Some(publisher) = weak.upgrade() {
                publisher.notify(&1);
            }
        }
    });

    publisher.notify(&0);
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}

#[test]
fn test_subscriber_count_zero_after_all_drops() {
    let publisher = Publisher::<()>::new();
    let subs: Vec<_> = (0..10).map(|_| publisher.subscribe(|_| {})).collect();
    assert_eq!(publisher.subscriber_count(), 10);
    assert!(!publisher.is_empty());

    drop(subs);
    assert_eq!(publisher.subscriber_count(), 0);
    assert!(publisher.is_empty());
}
