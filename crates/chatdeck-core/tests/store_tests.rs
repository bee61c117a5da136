use chatdeck_core::{ChatStore, DeckError, Message, MessageKind, Role};
use std::collections::HashSet;

// ========================================================================
// create_chat
// ========================================================================

#[test]
fn test_created_names_are_pairwise_distinct() {
    let mut store = ChatStore::new();
    let mut seen = HashSet::new();
    seen.insert(store.current_name().to_string());

    for i in 0..50 {
        // Shuffle names around so the counter-based scheme has to skip taken slots.
        if i % 7 == 3 {
            let current = store.current_name().to_string();
            let target = format!("Chat {}", store.len() + 2);
            if !store.contains(&target) {
                store.rename_chat(&current, &target).unwrap();
                seen.remove(&current);
                seen.insert(target);
            }
        }
        let name = store.create_chat("Chat");
        assert!(seen.insert(name.clone()), "duplicate chat name {name}");
    }
    assert_eq!(seen.len(), store.len());
}

#[test]
fn test_create_chat_becomes_current_and_empty() {
    let mut store = ChatStore::new();
    store.append_message("New Chat", Message::user("hi")).unwrap();

    let name = store.create_chat("Chat");
    assert_eq!(name, "Chat 2");
    assert_eq!(store.current_name(), "Chat 2");
    assert!(store.current_messages().is_empty());
    // Existing chat untouched
    assert_eq!(store.messages("New Chat").unwrap().len(), 1);
}

// ========================================================================
// rename_chat
// ========================================================================

#[test]
fn test_rename_then_switch_returns_same_messages() {
    let mut store = ChatStore::new();
    let a = store.create_chat("Chat");
    store.append_message(&a, Message::user("one")).unwrap();
    store.append_message(&a, Message::assistant("two")).unwrap();
    let before = store.switch_chat(&a).unwrap().to_vec();

    store.rename_chat(&a, "Renamed").unwrap();

    assert_eq!(store.switch_chat("Renamed").unwrap(), before.as_slice());
    assert!(matches!(store.switch_chat(&a), Err(DeckError::NotFound(_))));
}

#[test]
fn test_rename_active_chat_updates_current() {
    let mut store = ChatStore::new();
    store.rename_chat("New Chat", "Ideas").unwrap();
    assert_eq!(store.current_name(), "Ideas");
    assert!(!store.contains("New Chat"));
}

#[test]
fn test_rename_inactive_chat_keeps_current() {
    let mut store = ChatStore::new();
    let second = store.create_chat("Chat");
    store.rename_chat("New Chat", "Archive").unwrap();
    assert_eq!(store.current_name(), second);
    assert!(store.contains("Archive"));
}

#[test]
fn test_rename_collision_leaves_store_unchanged() {
    let mut store = ChatStore::with_initial_chat("Chat 1");
    store.append_message("Chat 1", Message::user("mine")).unwrap();
    let other = store.create_chat("Chat");
    assert_eq!(other, "Chat 2");
    store.append_message("Chat 2", Message::user("theirs")).unwrap();

    let err = store.rename_chat("Chat 1", "Chat 2").unwrap_err();
    assert!(matches!(err, DeckError::InvalidRename(_)));

    assert_eq!(store.messages("Chat 1").unwrap(), &[Message::user("mine")]);
    assert_eq!(store.messages("Chat 2").unwrap(), &[Message::user("theirs")]);
    assert_eq!(store.chat_names(), vec!["Chat 1", "Chat 2"]);
    assert_eq!(store.current_name(), "Chat 2");
}

#[test]
fn test_rename_to_empty_is_invalid() {
    let mut store = ChatStore::new();
    assert!(matches!(store.rename_chat("New Chat", ""), Err(DeckError::InvalidRename(_))));
    assert!(matches!(store.rename_chat("New Chat", "   "), Err(DeckError::InvalidRename(_))));
    assert_eq!(store.current_name(), "New Chat");
}

#[test]
fn test_rename_to_same_name_is_noop() {
    let mut store = ChatStore::new();
    store.rename_chat("New Chat", "New Chat").unwrap();
    assert_eq!(store.chat_names(), vec!["New Chat"]);
}

#[test]
fn test_rename_missing_chat_is_not_found() {
    let mut store = ChatStore::new();
    assert!(matches!(store.rename_chat("Ghost", "Other"), Err(DeckError::NotFound(_))));
}

#[test]
fn test_rename_trims_whitespace() {
    let mut store = ChatStore::new();
    store.rename_chat("New Chat", "  Travel plans ").unwrap();
    assert_eq!(store.current_name(), "Travel plans");
}

// ========================================================================
// append / clear / switch
// ========================================================================

#[test]
fn test_append_is_monotonic_and_order_preserving() {
    let mut store = ChatStore::new();
    let mut expected = Vec::new();
    for i in 0..10 {
        let msg = if i % 2 == 0 {
            Message::user(format!("u{i}"))
        } else {
            Message::assistant(format!("a{i}"))
        };
        let before = store.current_messages().len();
        store.append_message("New Chat", msg.clone()).unwrap();
        expected.push(msg);
        assert_eq!(store.current_messages().len(), before + 1);
        assert_eq!(store.current_messages(), expected.as_slice());
    }
}

#[test]
fn test_append_to_missing_chat_fails() {
    let mut store = ChatStore::new();
    let err = store.append_message("Nope", Message::user("x")).unwrap_err();
    assert!(matches!(err, DeckError::NotFound(name) if name == "Nope"));
}

#[test]
fn test_clear_then_switch_is_empty() {
    let mut store = ChatStore::new();
    store.append_message("New Chat", Message::user("x")).unwrap();
    store.create_chat("Chat");
    store.clear_chat("New Chat").unwrap();
    assert!(store.switch_chat("New Chat").unwrap().is_empty());
}

#[test]
fn test_clear_missing_chat_fails() {
    let mut store = ChatStore::new();
    assert!(matches!(store.clear_chat("Nope"), Err(DeckError::NotFound(_))));
}

#[test]
fn test_switch_missing_chat_keeps_current() {
    let mut store = ChatStore::new();
    store.create_chat("Chat");
    assert!(store.switch_chat("Nope").is_err());
    assert_eq!(store.current_name(), "Chat 2");
}

#[test]
fn test_hello_hi_there_scenario() {
    let mut store = ChatStore::with_initial_chat("Chat 1");
    store.append_message("Chat 1", Message::user("Hello")).unwrap();
    store.append_message("Chat 1", Message::assistant("Hi there")).unwrap();

    let messages = store.switch_chat("Chat 1").unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!((messages[0].role(), messages[0].text()), (Role::User, Some("Hello")));
    assert_eq!(
        (messages[1].role(), messages[1].text()),
        (Role::Assistant, Some("Hi there"))
    );
    assert!(messages.iter().all(|m| m.kind() == MessageKind::Text));
}

#[test]
fn test_other_chat_names_excludes_current() {
    let mut store = ChatStore::new();
    store.create_chat("Chat");
    store.create_chat("Chat");
    assert_eq!(store.other_chat_names(), vec!["New Chat", "Chat 2"]);
    store.switch_chat("New Chat").unwrap();
    assert_eq!(store.other_chat_names(), vec!["Chat 2", "Chat 3"]);
}
