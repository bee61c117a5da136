use std::time::Duration;

use chatdeck_cli::worker::ResponderWorker;
use chatdeck_core::{EchoResponder, PlaceholderResponder, ResponseRequest, SessionState, Settings};

#[tokio::test]
async fn test_worker_answers_in_order() {
    let mut worker = ResponderWorker::spawn(Box::new(EchoResponder));
    assert_eq!(worker.name(), "echo");

    worker.send(ResponseRequest::text_only("Chat 1", "first")).unwrap();
    worker.send(ResponseRequest::text_only("Chat 2", "second")).unwrap();

    let (req, reply) = worker.recv().await.unwrap();
    assert_eq!(req.chat_name, "Chat 1");
    assert_eq!(reply.unwrap(), "You said: first");

    let (req, reply) = worker.recv().await.unwrap();
    assert_eq!(req.chat_name, "Chat 2");
    assert_eq!(reply.unwrap(), "You said: second");
}

#[tokio::test(start_paused = true)]
async fn test_try_recv_is_empty_until_delay_elapses() {
    let delay = Duration::from_millis(1000);
    let mut worker = ResponderWorker::spawn(Box::new(PlaceholderResponder::new(delay)));
    worker.send(ResponseRequest::text_only("New Chat", "hi")).unwrap();

    tokio::task::yield_now().await;
    assert!(worker.try_recv().is_none());

    let (_, reply) = worker.recv().await.unwrap();
    assert!(reply.unwrap().starts_with("You said: 'hi'."));
}

#[tokio::test]
async fn test_reply_lands_in_originating_chat_after_switch() {
    let mut state = SessionState::studio(&Settings::default()).unwrap();
    let mut worker = ResponderWorker::spawn(Box::new(EchoResponder));

    let origin = state.current_name().to_string();
    let request = state.begin_submit("ping").unwrap();
    worker.send(request).unwrap();

    state
        .apply(chatdeck_core::SessionEvent::Switch("Chat 1".into()))
        .unwrap();

    let (request, reply) = worker.recv().await.unwrap();
    state.finish_submit(&request, reply).unwrap();

    let messages = state.store().messages(&origin).unwrap();
    assert_eq!(messages.last().unwrap().text(), Some("You said: ping"));
    assert_eq!(state.current_messages().len(), 1);
}
