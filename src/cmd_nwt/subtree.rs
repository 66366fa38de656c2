use super::utils;
use clap::*;
use nwt::libs::phylo::extract;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("subtree")
        .about("Extracts the minimal subtree over a set of tips")
        .after_help(
            r###"
Reduces each tree to the minimal subtree whose tip set equals the selected
names. Single-child chains left behind by the reduction are collapsed, adding
up branch lengths along the way.

Notes:
* Tip selection:
    * `-n`: Select tips by exact name.
    * `-f`: Select tips from a file (first column).
    * `-r`: Select tips by regular expression (case insensitive).
* Every selected name must be a tip of the tree; unknown names are an error.
* `--fast` switches to the single-pass reducer, which additionally merges
  per-edge numeric parameters (branch-length-weighted average) when
  collapsing. With `--fast`, a selected internal name keeps its whole clade.

Examples:
1. Keep three taxa:
   nwt subtree tree.nwk -n A -n C -n D

2. Keep every tip matching a pattern, single-pass:
   nwt subtree tree.nwk -r "^Homo" --fast
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
            Arg::new("node")
                .long("node")
                .short('n')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Select tips by exact name"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .num_args(1)
                .help("Select tips from a file"),
        )
        .arg(
            Arg::new("regex")
                .long("regex")
                .short('r')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Select tips by regular expression (case insensitive)"),
        )
        .arg(
            Arg::new("fast")
                .long("fast")
                .action(ArgAction::SetTrue)
                .help("Use the single-pass reducer with parameter merging"),
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
    let is_fast = args.get_flag("fast");

    let trees = nwt::libs::phylo::reader::from_file(infile)?;

    for tree in trees {
        let names = utils::match_tip_names(&tree, args);

        let sub = if is_fast {
            extract::induced_subtree_fast(&tree, &names)?
        } else {
            extract::induced_subtree(&tree, &names)?
        };

        let out_string = sub.to_newick();
        writer.write_all((out_string + "\n").as_ref())?;
    }

    Ok(())
}
