//! Prints the alignment records within a chain file as a table.
//!
//! ```
//! cargo run --release --example chain_view <CHAIN> [CHAIN_ID]...
//! ```
//!
//! If any chain ids are provided, only the records built from those chains
//! are shown.

use std::env;

use chainpaf::convert::Converter;
use chainpaf::loader::Local;
use chainpaf::location::Location;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let src = env::args().nth(1).expect("missing src");
    let location = src.parse::<Location>()?;

    let chain_ids = env::args().skip(2).collect::<Vec<_>>();

    let records = Converter::default().load(&Local, &location)?;

    let mut builder = Builder::default();
    builder.push_record([
        "Chain", "Query", "Size", "Start", "End", "Strand", "Target", "Size", "Start", "End",
        "Matches", "Block", "CIGAR",
    ]);

    for record in &records {
        if !chain_ids.is_empty()
            && !record
                .chain_id()
                .is_some_and(|id| chain_ids.iter().any(|wanted| wanted == id))
        {
            continue;
        }

        builder.push_record([
            record.chain_id().unwrap_or("<None>"),
            record.query().name(),
            &record.query().size().to_string(),
            &record.query().start().to_string(),
            &record.query().end().to_string(),
            &record.strand().to_string(),
            record.target().name(),
            &record.target().size().to_string(),
            &record.target().start().to_string(),
            &record.target().end().to_string(),
            &record.num_matches().to_string(),
            &record.block_len().to_string(),
            &record.cigar().to_string(),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);

    Ok(())
}
