pub const BANNER: &str = "Ontology-based Semantic Clustering";

pub const HELP: &str = "\
Commands:
  files <path>...       choose documents (replaces the current selection)
  drop <path>...        drop documents onto the upload zone
  remove <row>          remove one selected document
  text <content>        set the text to analyze (use \\n for line breaks)
  clear-text            empty the text area
  method <name>         ontology | neural
  analyze               submit text or documents
  download <cluster>    save one cluster as cluster_<id>.txt
  download-all          save every cluster as all_clusters.txt
  show                  redraw the screen
  help                  this list
  quit                  leave";

pub const PROMPT: &str = "> ";

pub fn initial_screen() -> String {
    format!("{BANNER}\n{}\n\n{HELP}\n", "=".repeat(BANNER.len()))
}
