use clap::ArgMatches;
use nwt::libs::phylo::tree::Tree;
use regex::RegexBuilder;
use std::collections::BTreeSet;

/// Tip names matching the selection rules (`--node`, `--file`, `--regex`).
pub fn match_tip_names(tree: &Tree, args: &ArgMatches) -> BTreeSet<String> {
    let tip_names = tree.tip_names();

    let mut names = BTreeSet::new();

    // names supplied by --node
    if args.contains_id("node") {
        for name in args.get_many::<String>("node").unwrap() {
            names.insert(name.clone());
        }
    }

    // names supplied by --file
    if args.contains_id("file") {
        let file = args.get_one::<String>("file").unwrap();
        for name in intspan::read_first_column(file).iter() {
            names.insert(name.clone());
        }
    }

    // names matched with --regex; only existing tips can match
    if args.contains_id("regex") {
        for regex in args.get_many::<String>("regex").unwrap() {
            let re = RegexBuilder::new(regex)
                .case_insensitive(true)
                .build()
                .unwrap();
            for name in tip_names.iter() {
                if re.is_match(name) {
                    names.insert(name.clone());
                }
            }
        }
    }

    names
}
