use clap::*;
use nwt::libs::phylo::reader;
use nwt::libs::phylo::resolve;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("resolve")
        .about("Bounds the branching factor with synthetic nodes")
        .after_help(
            r###"
Rewrites each tree so that no node has more than --max children. Oversized
child lists are resolved by repeatedly grouping the last --max children under
a fresh synthetic node carrying branch length --eps.

Notes:
* The grouping peels from the tail; sibling order is preserved.
* --max 2 produces a strictly bifurcating tree.
* Tip sets and root-to-tip distances are unchanged apart from the inserted
  --eps edges.

Examples:
1. Strictly bifurcating:
   nwt resolve tree.nwk

2. At most 3 children, synthetic edges of length 1e-6:
   nwt resolve tree.nwk --max 3 --eps 1e-6
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
            Arg::new("max")
                .long("max")
                .short('m')
                .num_args(1)
                .default_value("2")
                .value_parser(value_parser!(usize))
                .help("Maximum number of children per node"),
        )
        .arg(
            Arg::new("eps")
                .long("eps")
                .num_args(1)
                .default_value("0.0")
                .value_parser(value_parser!(f64))
                .help("Branch length assigned to synthetic nodes"),
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
    //----------------------------
    // Args
    //----------------------------
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();
    let max_children = *args.get_one::<usize>("max").unwrap();
    let eps = *args.get_one::<f64>("eps").unwrap();

    let trees = reader::from_file(infile)?;

    for tree in trees {
        let resolved = resolve::multifurcating(&tree, max_children, eps)?;
        let out_string = resolved.to_newick();
        writer.write_all((out_string + "\n").as_ref())?;
    }

    Ok(())
}
