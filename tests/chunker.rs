use chathook::chunk::{chunk_text, fence, DEFAULT_CHUNK_SIZE, MESSAGE_CEILING};

/// Joining the chunks with newlines must reproduce the input exactly, for
/// any input and budget.
#[test]
fn chunks_join_back_to_original() {
    let long_line = "x".repeat(5000);
    let mixed = format!("{}\n{}\n{}", "a".repeat(30), "b".repeat(3), "c".repeat(90));
    let inputs = [
        "",
        "one line",
        "a\nb\nc",
        "trailing newline\n",
        "\n\n\n",
        long_line.as_str(),
        mixed.as_str(),
    ];
    for input in inputs {
        for budget in [1, 7, 10, 64, 1990] {
            let chunks = chunk_text(input, budget);
            assert_eq!(
                chunks.join("\n"),
                input,
                "round-trip failed for budget {budget}"
            );
        }
    }
}

#[test]
fn content_fitting_budget_is_one_chunk() {
    let input = "a".repeat(10);
    assert_eq!(chunk_text(&input, 10), vec![input]);
}

/// A forced line-boundary split yields a first chunk strictly within budget.
#[test]
fn split_respects_budget_strictly() {
    // "aaaa\nbbbb" is 9 bytes; with budget 8 the second line cannot join.
    let chunks = chunk_text("aaaa\nbbbb", 8);
    assert_eq!(chunks, vec!["aaaa", "bbbb"]);
    assert!(chunks[0].len() <= 8);
}

/// A line plus its separator exactly equal to the budget is included
/// (strict `<=` inclusion rule).
#[test]
fn exact_boundary_line_is_included() {
    // "aaaa" + '\n' + "bbb" is exactly 8 bytes.
    assert_eq!(chunk_text("aaaa\nbbb", 8), vec!["aaaa\nbbb"]);
    // One byte more and it splits.
    assert_eq!(chunk_text("aaaa\nbbbb", 8), vec!["aaaa", "bbbb"]);
}

#[test]
fn empty_input_yields_single_empty_chunk() {
    assert_eq!(chunk_text("", 10), vec![""]);
}

/// A single line longer than the budget is emitted as its own oversized
/// chunk, never split mid-line.
#[test]
fn oversized_line_is_own_chunk() {
    let long = "z".repeat(25);
    let input = format!("short\n{long}\ntail");
    let chunks = chunk_text(&input, 10);
    assert_eq!(chunks, vec!["short".to_string(), long, "tail".to_string()]);
}

/// The worked example from the design discussion: with a budget of 10,
/// "abcde\nfghij" would be 11 bytes, so under the strict rule every line is
/// its own chunk.
#[test]
fn ten_byte_budget_example() {
    let chunks = chunk_text("abcde\nfghij\nklmno", 10);
    assert_eq!(chunks, vec!["abcde", "fghij", "klmno"]);
}

#[test]
fn chunker_is_deterministic() {
    let input = format!("{}\n{}", "a".repeat(40), "b".repeat(40));
    assert_eq!(chunk_text(&input, 50), chunk_text(&input, 50));
}

#[test]
fn fence_wraps_on_own_lines() {
    assert_eq!(fence("hello"), "```\nhello\n```");
}

/// A default-sized chunk still fits the message ceiling once fenced.
#[test]
fn default_chunk_size_leaves_room_for_fences() {
    let chunk = "x".repeat(DEFAULT_CHUNK_SIZE);
    assert!(fence(&chunk).len() <= MESSAGE_CEILING);
}
