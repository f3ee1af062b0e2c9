use orgmatch::lexicon::TypeLexicon;
use orgmatch::segment::boundary::detect_spans;
use orgmatch::segment::types::TextBlock;

fn show_detection(text: &str, lexicon: &TypeLexicon) {
    println!("Input text: {}", text);
    println!("{}", "-".repeat(70));

    let spans = detect_spans(&TextBlock::new(text, None), lexicon);
    println!("Detected {} spans:", spans.len());
    for (i, span) in spans.iter().enumerate() {
        println!("  {}. [{}..{}] {}", i + 1, span.start_offset, span.end_offset, span.text);
    }
    println!("{}", "-".repeat(70));
}

fn main() {
    println!("Entity Boundary Detection Test Tool");
    println!("-----------------------------------");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        show_detection(&args.join(" "), TypeLexicon::base());
        return;
    }

    let test_cases = [
        "Abundance Institute George W Bush Foundation Open Ran Policy Coalition",
        "Microsoft Corporation Apple Inc Google LLC",
        "Council on Foreign Relations Brookings Institution Atlantic Council",
        "American Enterprise Institute Heritage Foundation Cato Institute",
        "Dallas Regional Chamber of Commerce Nebraska Chamber of Commerce",
        "Netchoice United Church of Christ",
    ];

    println!("\nBase pattern set:");
    for case in &test_cases {
        show_detection(case, TypeLexicon::base());
    }

    println!("\nExtended pattern set:");
    let extended_cases = ["Nokia Oyj Ericsson AB", "Singtel Pte Ltd Maybank Sdn Bhd"];
    for case in &extended_cases {
        show_detection(case, TypeLexicon::extended());
    }
}
