//! Classification of real-world server lines.

use slbot_proto::{parse, IgnoreReason, LineFramer, ParsedMessage};

#[test]
fn classifies_a_registration_burst() {
    let burst = b"NOTICE AUTH :*** Looking up your hostname...\r\n\
:irc.example.net 001 slbot :Welcome to the network\r\n\
PING :4F2A91\r\n\
:alice!alice@host.example PRIVMSG #rust :!ping\r\n\
:bob!bob@host.example PRIVMSG #rust :\x01ACTION waves\x01\r\n\
ERROR :Closing Link\r\n";

    let mut framer = LineFramer::new();
    let lines: Vec<String> = framer
        .feed(burst)
        .filter(|l| !l.is_empty())
        .map(|l| l.text().into_owned())
        .collect();
    let parsed: Vec<ParsedMessage<'_>> = lines.iter().map(|l| parse(l)).collect();

    assert_eq!(
        parsed,
        vec![
            ParsedMessage::Ignorable {
                reason: IgnoreReason::NoticeAuth
            },
            ParsedMessage::Ignorable {
                reason: IgnoreReason::NotPrivmsg
            },
            ParsedMessage::Ping { token: "4F2A91" },
            ParsedMessage::Chat(slbot_proto::ChatEvent {
                nick: "alice",
                text: "!ping"
            }),
            ParsedMessage::Ignorable {
                reason: IgnoreReason::ControlByte
            },
            ParsedMessage::Ignorable {
                reason: IgnoreReason::ServerError
            },
        ]
    );
}

#[test]
fn text_keeps_colons_after_the_first() {
    let line = ":carol!c@h PRIVMSG #rust :see https://example.com:8080/x";
    let chat = parse(line).as_chat().copied().expect("chat event");
    assert_eq!(chat.nick, "carol");
    assert_eq!(chat.text, "see https://example.com:8080/x");
}
