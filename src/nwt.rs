extern crate clap;
use clap::*;

mod cmd_nwt;

fn main() -> anyhow::Result<()> {
    let app = Command::new("nwt")
        .version(crate_version!())
        .about("`nwt` - Newick tree manipulation for trait-prediction pipelines")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_nwt::name::make_subcommand())
        .subcommand(cmd_nwt::resolve::make_subcommand())
        .subcommand(cmd_nwt::subtree::make_subcommand())
        .subcommand(cmd_nwt::stat::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Tree rewriting:
    * name    - Assign names to unnamed internal nodes
    * resolve - Bound the branching factor with synthetic nodes
    * subtree - Extract the minimal subtree over a tip set

* Info:
    * stat    - Print statistics about trees

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("name", sub_matches)) => cmd_nwt::name::execute(sub_matches),
        Some(("resolve", sub_matches)) => cmd_nwt::resolve::execute(sub_matches),
        Some(("subtree", sub_matches)) => cmd_nwt::subtree::execute(sub_matches),
        Some(("stat", sub_matches)) => cmd_nwt::stat::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
