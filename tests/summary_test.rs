use email_hops::*;
use serde_json::json;

const GMAIL_HEADERS: &str = "Delivered-To: bob@example.com\r\n\
Received: by 2002:a05:7000:1a0b with SMTP id q11csp1;\r\n\
\tThu, 1 Jan 2025 04:00:02 -0800 (PST)\r\n\
Received: from mail-sor-f41.google.com (mail-sor-f41.google.com. [209.85.220.41])\r\n\
\tby mx.google.com with SMTPS id a1sor;\r\n\
\tThu, 01 Jan 2025 04:00:01 -0800 (PST)\r\n\
DKIM-Signature: v=1; a=rsa-sha256; c=relaxed/relaxed;\r\n\
\td=gmail.com; s=20230601; h=to:subject:from; bh=abc=;\r\n\
\tb=def\r\n\
Return-Path: <alice@gmail.com>\r\n\
From: Alice <alice@gmail.com>\r\n\
To: bob@example.com\r\n\
Subject: Quarterly report\r\n";

#[test]
fn test_summarize_gmail_message() {
    let summary = summarize_headers(GMAIL_HEADERS);

    assert_eq!(summary.from_email.as_deref(), Some("Alice <alice@gmail.com>"));
    assert_eq!(summary.to_email.as_deref(), Some("bob@example.com"));
    assert_eq!(
        summary.servers.hosts(),
        ["mail-sor-f41.google.com", "mx.google.com", "2002:a05:7000:1a0b"]
    );
    // gmail.com carries no provider needle, so the full-text pass decides
    assert_eq!(summary.esp, EspLabel::Google);
}

#[test]
fn test_summarize_empty_input() {
    let summary = summarize_headers("");

    assert_eq!(summary, EmailHeaderSummary::default());
    assert!(summary.from_email.is_none());
    assert!(summary.to_email.is_none());
    assert!(summary.servers.is_empty());
    assert_eq!(summary.esp, EspLabel::Unknown);
}

#[test]
fn test_summarize_garbage_input() {
    let summary = summarize_headers("\u{0}\u{1}not a header\n\t\n:::\r\n");

    assert!(summary.servers.is_empty());
    assert_eq!(summary.esp, EspLabel::Unknown);
}

#[test]
fn test_summarize_is_idempotent() {
    assert_eq!(summarize_headers(GMAIL_HEADERS), summarize_headers(GMAIL_HEADERS));
}

#[test]
fn test_summary_json_shape() {
    let headers = "Received: from o1.ptr.sendgrid.net by mx.example.com\r\n\
                   Return-Path: <bounces@sendgrid.net>\r\n\
                   To: bob@example.com\r\n";
    let summary = summarize_headers(headers);

    assert_eq!(
        summary.to_json(),
        json!({
            "fromEmail": null,
            "toEmail": "bob@example.com",
            "servers": ["o1.ptr.sendgrid.net", "mx.example.com"],
            "ESP": "SendGrid"
        })
    );
}

#[test]
fn test_header_block_stops_at_body() {
    let raw = b"From: a@example.com\r\n\
                Subject: Hi\r\n\
                \r\n\
                Received: from body.example.com by fake.example.com\r\n";
    let block = header_block(raw);

    assert!(block.contains("Subject: Hi"));
    assert!(!block.contains("body.example.com"));
}

#[test]
fn test_summarize_message_ignores_body() {
    let raw = b"Received: from a.example.org by b.example.net\r\n\
                From: a@example.org\r\n\
                To: b@example.net\r\n\
                Subject: Hi\r\n\
                \r\n\
                Forwarded: Received: from zoho.com by google.com\r\n";
    let summary = summarize_message(raw);

    assert_eq!(summary.servers.hosts(), ["a.example.org", "b.example.net"]);
    assert_eq!(summary.from_email.as_deref(), Some("a@example.org"));
    assert_eq!(summary.esp, EspLabel::Unknown);
}
