use clap::*;
use nwt::libs::phylo::reader;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("stat")
        .about("Prints statistics about trees")
        .after_help(
            r###"
Prints information about the trees in the input.

Output format (key-value TSV, one block per tree):
  nodes	9
  tips	5
  internals	4
  unnamed internals	2
  max children	3

Examples:
1. Default statistics:
   nwt stat tree.nwk

2. Output to file:
   nwt stat tree.nwk -o stats.tsv
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input filename. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();

    let trees = reader::from_file(infile)?;

    for tree in trees {
        let mut tips = 0usize;
        let mut internals = 0usize;
        let mut unnamed_internals = 0usize;
        let mut max_children = 0usize;

        if let Some(root) = tree.get_root() {
            for id in tree.preorder(&root)? {
                let node = tree.get_node(id).unwrap();
                if node.is_tip() {
                    tips += 1;
                } else {
                    internals += 1;
                    if node.name.as_deref().unwrap_or("").is_empty() {
                        unnamed_internals += 1;
                    }
                    max_children = max_children.max(node.children.len());
                }
            }
        }

        writer.write_fmt(format_args!("nodes\t{}\n", tips + internals))?;
        writer.write_fmt(format_args!("tips\t{}\n", tips))?;
        writer.write_fmt(format_args!("internals\t{}\n", internals))?;
        writer.write_fmt(format_args!("unnamed internals\t{}\n", unnamed_internals))?;
        writer.write_fmt(format_args!("max children\t{}\n", max_children))?;
    }

    Ok(())
}
