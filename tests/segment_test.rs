use email_hops::*;

#[test]
fn test_no_received_fields() {
    let headers = "From: a@example.com\r\nTo: b@example.com\r\nSubject: Hi\r\n";
    assert!(trace_blocks(headers).is_empty());
    assert!(trace_blocks("").is_empty());
}

#[test]
fn test_folded_received_is_joined() {
    let headers = "Received: from mx.example.net (mx.example.net [192.0.2.1])\r\n\
                   \tby mail.example.com with ESMTPS id abc123\r\n\
                   \x20   for <b@example.com>; Thu, 01 Jan 2025 12:00:00 +0000\r\n\
                   Subject: Hi\r\n";
    let blocks = trace_blocks(headers);

    assert_eq!(blocks.len(), 1);
    assert_eq!(
        blocks[0].as_str(),
        "Received: from mx.example.net (mx.example.net [192.0.2.1]) \
         by mail.example.com with ESMTPS id abc123 \
         for <b@example.com>; Thu, 01 Jan 2025 12:00:00 +0000"
    );
}

#[test]
fn test_blocks_keep_source_order() {
    let headers = "Received: from b by c\nReceived: from a\n by b\nFrom: x@example.com\n";
    let blocks = trace_blocks(headers);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].as_str(), "Received: from b by c");
    assert_eq!(blocks[1].as_str(), "Received: from a by b");
}

#[test]
fn test_received_is_case_insensitive() {
    let blocks = trace_blocks("RECEIVED: from a by b\nreceived: from c by d\n");
    assert_eq!(blocks.len(), 2);
}

#[test]
fn test_other_header_closes_block() {
    let headers = "Received: from a by b\nX-Spam: no\n continued spam header\n";
    let blocks = trace_blocks(headers);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].as_str(), "Received: from a by b");
}

#[test]
fn test_received_after_other_headers_is_collected() {
    let headers = "Received: from a by b\nX-Mailer: test\nReceived: from c by d\n";
    let blocks = trace_blocks(headers);

    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].as_str(), "Received: from c by d");
}

#[test]
fn test_received_spf_is_not_a_trace_field() {
    let headers = "Received-SPF: pass (example.com: domain of a@example.com)\n";
    assert!(trace_blocks(headers).is_empty());
}

#[test]
fn test_trace_block_display() {
    let block = TraceBlock::new("Received: from a by b");
    assert_eq!(block.to_string(), "Received: from a by b");
}

#[test]
fn test_header_field_first_match() {
    let headers = "From: Alice <alice@example.com>\r\nTo: bob@example.com\r\nTo: carol@example.com\r\n";

    assert_eq!(
        header_field(headers, HeaderField::From),
        Some("Alice <alice@example.com>")
    );
    assert_eq!(header_field(headers, HeaderField::To), Some("bob@example.com"));
}

#[test]
fn test_header_field_case_insensitive() {
    let headers = "return-path: <bounce@example.com>\n";
    assert_eq!(
        header_field(headers, HeaderField::ReturnPath),
        Some("<bounce@example.com>")
    );
}

#[test]
fn test_header_field_absent() {
    assert_eq!(header_field("Subject: hi\n", HeaderField::From), None);
    assert_eq!(header_field("", HeaderField::To), None);
}

#[test]
fn test_header_field_anchored_at_line_start() {
    let headers = "Reply-To: someone@example.com\nX-Original-From: other@example.com\n";
    assert_eq!(header_field(headers, HeaderField::To), None);
    assert_eq!(header_field(headers, HeaderField::From), None);
}

#[test]
fn test_header_field_strips_carriage_return() {
    let headers = "To: bob@example.com\r\n";
    assert_eq!(header_field(headers, HeaderField::To), Some("bob@example.com"));
}

#[test]
fn test_header_field_names() {
    assert_eq!(HeaderField::ReturnPath.name(), "Return-Path");
    assert_eq!(HeaderField::DkimSignature.to_string(), "DKIM-Signature");
}

#[test]
fn test_unfolded_field() {
    let headers = "DKIM-Signature: v=1; a=rsa-sha256;\r\n\
                   \tc=relaxed/relaxed; d=example.com;\r\n\
                   \ts=s1; b=abc\r\n\
                   From: a@example.com\r\n";

    assert_eq!(
        unfolded_field(headers, "dkim-signature").as_deref(),
        Some("v=1; a=rsa-sha256; c=relaxed/relaxed; d=example.com; s=s1; b=abc")
    );
    assert_eq!(unfolded_field(headers, "Received"), None);
}

#[test]
fn test_unfolded_field_returns_first_occurrence() {
    let headers = "X-Tag: one\n two\nX-Tag: three\n";
    assert_eq!(unfolded_field(headers, "X-Tag").as_deref(), Some("one two"));
}
