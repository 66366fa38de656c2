use clap::*;
use nwt::libs::phylo::namer;
use nwt::libs::phylo::reader;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("name")
        .about("Assigns names to unnamed internal nodes")
        .after_help(
            r###"
Gives every unnamed internal node (the root included) a unique synthetic name
of the form "node1", "node2", ... so that ancestors can be referenced by
downstream trait-prediction steps.

Notes:
* Names already present anywhere in the tree are never reused.
* Tip names are never altered.
* Running the command twice changes nothing.

Examples:
1. Name internal nodes:
   nwt name tree.nwk

2. From stdin to a file:
   echo "((A,B),(C,D));" | nwt name stdin -o named.nwk
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
    //----------------------------
    // Args
    //----------------------------
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();

    let trees = reader::from_file(infile)?;

    for mut tree in trees {
        namer::name_unnamed_nodes(&mut tree);
        let out_string = tree.to_newick();
        writer.write_all((out_string + "\n").as_ref())?;
    }

    Ok(())
}
