use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

// =============================================================
// In-memory document
// =============================================================

/// Click targets are slash paths; anything under `menu` is inside the menu.
#[derive(Clone, Default)]
struct FakeDocument {
    listeners: Rc<RefCell<Vec<(u32, ClickHandler<str>)>>>,
    next_id: Rc<Cell<u32>>,
    stray_removals: Rc<Cell<u32>>,
}

impl FakeDocument {
    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn click(&self, target: &str) {
        let snapshot: Vec<ClickHandler<str>> = self.listeners.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
        for handler in snapshot {
            handler(target);
        }
    }
}

impl ClickSurface for FakeDocument {
    type Target = str;
    type Registration = u32;

    fn listen(&self, handler: ClickHandler<str>) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.listeners.borrow_mut().push((id, handler));
        id
    }

    fn unlisten(&self, registration: u32) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != registration);
        if listeners.len() == before {
            self.stray_removals.set(self.stray_removals.get() + 1);
        }
    }
}

fn menu_with_log(doc: &FakeDocument) -> (AccountMenu<FakeDocument>, Rc<RefCell<Vec<MenuState>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_in = Rc::clone(&log);
    let menu = AccountMenu::new(
        doc.clone(),
        |target: &str| target == "menu" || target.starts_with("menu/"),
        move |state| log_in.borrow_mut().push(state),
    );
    (menu, log)
}

fn assert_listener_matches_state(menu: &AccountMenu<FakeDocument>, doc: &FakeDocument) {
    assert_eq!(menu.is_listening(), menu.is_open());
    assert_eq!(doc.listener_count(), usize::from(menu.is_open()));
}

// =============================================================
// MenuState transitions
// =============================================================

#[test]
fn menu_state_default_is_closed() {
    assert_eq!(MenuState::default(), MenuState::Closed);
    assert!(!MenuState::Closed.is_open());
}

#[test]
fn menu_state_toggle_flips() {
    assert_eq!(MenuState::Closed.toggled(), MenuState::Open);
    assert_eq!(MenuState::Open.toggled(), MenuState::Closed);
}

#[test]
fn menu_state_only_outside_click_while_open_closes() {
    assert_eq!(MenuState::Open.after_document_click(false), MenuState::Closed);
    assert_eq!(MenuState::Open.after_document_click(true), MenuState::Open);
    assert_eq!(MenuState::Closed.after_document_click(false), MenuState::Closed);
    assert_eq!(MenuState::Closed.after_document_click(true), MenuState::Closed);
}

// =============================================================
// Listener lifecycle
// =============================================================

#[test]
fn new_menu_is_closed_without_listener() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    assert_eq!(menu.state(), MenuState::Closed);
    assert!(!menu.is_listening());
    assert_eq!(doc.listener_count(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn toggle_installs_then_removes_listener() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);

    menu.toggle();
    assert!(menu.is_open());
    assert_eq!(doc.listener_count(), 1);

    menu.toggle();
    assert!(!menu.is_open());
    assert_eq!(doc.listener_count(), 0);
    assert_eq!(*log.borrow(), vec![MenuState::Open, MenuState::Closed]);
    assert_eq!(doc.stray_removals.get(), 0);
}

#[test]
fn opening_twice_keeps_a_single_listener() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    menu.open();
    menu.open();
    assert_eq!(doc.listener_count(), 1);
    assert_eq!(*log.borrow(), vec![MenuState::Open]);
}

#[test]
fn closing_while_closed_is_a_no_op() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    menu.close();
    assert!(log.borrow().is_empty());
    assert_eq!(doc.stray_removals.get(), 0);
}

#[test]
fn outside_click_closes_exactly_once() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    menu.open();

    doc.click("body/main");
    assert_eq!(menu.state(), MenuState::Closed);
    assert_eq!(doc.listener_count(), 0);

    doc.click("body/main");
    assert_eq!(*log.borrow(), vec![MenuState::Open, MenuState::Closed]);
}

#[test]
fn inside_click_never_closes() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    menu.open();

    doc.click("menu");
    doc.click("menu/logout");
    assert!(menu.is_open());
    assert_eq!(doc.listener_count(), 1);
    assert_eq!(*log.borrow(), vec![MenuState::Open]);
}

#[test]
fn lookalike_target_counts_as_outside() {
    let doc = FakeDocument::default();
    let (menu, _log) = menu_with_log(&doc);
    menu.open();
    doc.click("menubar");
    assert!(!menu.is_open());
}

#[test]
fn reopening_after_outside_click_installs_fresh_listener() {
    let doc = FakeDocument::default();
    let (menu, _log) = menu_with_log(&doc);
    menu.open();
    doc.click("elsewhere");
    menu.toggle();
    assert!(menu.is_open());
    assert_eq!(doc.listener_count(), 1);
    doc.click("elsewhere");
    assert!(!menu.is_open());
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn teardown_while_open_removes_listener_silently() {
    let doc = FakeDocument::default();
    let (menu, log) = menu_with_log(&doc);
    menu.open();
    menu.teardown();
    assert_eq!(doc.listener_count(), 0);
    assert!(!menu.is_open());
    assert_eq!(*log.borrow(), vec![MenuState::Open]);

    menu.teardown();
    assert_eq!(doc.stray_removals.get(), 0);
}

#[test]
fn drop_while_open_leaves_no_listener() {
    let doc = FakeDocument::default();
    let (menu, _log) = menu_with_log(&doc);
    menu.open();
    drop(menu);
    assert_eq!(doc.listener_count(), 0);
    doc.click("elsewhere");
    assert_eq!(doc.stray_removals.get(), 0);
}

#[test]
fn two_menus_on_one_document_are_independent() {
    let doc = FakeDocument::default();
    let (first, _) = menu_with_log(&doc);
    let (second, _) = menu_with_log(&doc);
    first.open();
    second.open();
    assert_eq!(doc.listener_count(), 2);
    first.close();
    assert_eq!(doc.listener_count(), 1);
    assert!(second.is_listening());
}

// =============================================================
// Invariant over interaction sequences
// =============================================================

#[derive(Clone, Copy, Debug)]
enum Op {
    Toggle,
    Open,
    Close,
    ClickInside,
    ClickOutside,
}

const OPS: [Op; 5] = [Op::Toggle, Op::Open, Op::Close, Op::ClickInside, Op::ClickOutside];

fn apply(op: Op, menu: &AccountMenu<FakeDocument>, doc: &FakeDocument) {
    match op {
        Op::Toggle => menu.toggle(),
        Op::Open => menu.open(),
        Op::Close => menu.close(),
        Op::ClickInside => doc.click("menu/item"),
        Op::ClickOutside => doc.click("page"),
    }
}

#[test]
fn listener_registered_iff_open_for_all_short_sequences() {
    const LEN: u32 = 5;
    let total = OPS.len().pow(LEN);
    for mut code in 0..total {
        let doc = FakeDocument::default();
        let (menu, _log) = menu_with_log(&doc);
        let mut seq = Vec::new();
        for _ in 0..LEN {
            let op = OPS[code % OPS.len()];
            code /= OPS.len();
            seq.push(op);
            apply(op, &menu, &doc);
            assert_eq!(
                menu.is_listening(),
                menu.is_open(),
                "listener/state mismatch after {seq:?}"
            );
            assert_listener_matches_state(&menu, &doc);
        }
        drop(menu);
        assert_eq!(doc.listener_count(), 0, "listener leaked after {seq:?}");
        assert_eq!(doc.stray_removals.get(), 0, "stray removal after {seq:?}");
    }
}
