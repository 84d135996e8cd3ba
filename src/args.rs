use clap::{Parser, Subcommand};

/// Counts the votes expressed in free-text comments of a spreadsheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the server, the report and the chat service.
    /// Command line options take precedence over the settings in this file.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Runs the HTTP service that classifies uploaded workbooks.
    Serve {
        /// (address, default 127.0.0.1:5000) The address to listen on.
        #[clap(short, long, value_parser)]
        bind: Option<String>,
    },
    /// Counts the votes of a file and prints the summary in JSON format.
    Count {
        /// (file path) The spreadsheet to read. The vote column is found from its header.
        #[clap(short, long, value_parser)]
        input: String,

        /// (xlsx or csv, default from the file extension) The type of the input.
        #[clap(long, value_parser)]
        input_type: Option<String>,

        /// (file path or 'stdout') If specified, the summary will be written in JSON format to the given location.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (file path) A reference file containing a summary in JSON format. If provided, the computed
        /// summary must match the reference.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },
    /// Prints a report of the 'text' column: sample, counts, chart, null votes and frequent words.
    Report {
        /// (file path) The spreadsheet to read. It must have a column named 'text'.
        #[clap(short, long, value_parser)]
        input: String,

        /// (xlsx or csv, default from the file extension) The type of the input.
        #[clap(long, value_parser)]
        input_type: Option<String>,

        /// (default 10) The number of comments to show in the sample.
        #[clap(long, value_parser)]
        sample_size: Option<usize>,

        /// (default 42) The seed of the sample.
        #[clap(long, value_parser)]
        seed: Option<u32>,

        /// If passed as an argument, all the comments are sent to the chat service and its answer is printed.
        #[clap(long, takes_value = false)]
        chatbot: bool,
    },
}
