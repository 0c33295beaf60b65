use clap::ValueEnum;

/// How pages learn about changes
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Pages poll a sentinel URL carrying the tree signature
    ///
    /// Works through any proxy; a stale signature answers 202 and the page
    /// reloads.
    #[value(name = "pull")]
    Pull,

    /// Pages hold a WebSocket open and reload when told to
    #[value(name = "push")]
    Push,
}
