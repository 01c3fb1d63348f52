//! Conversation states and the transition table.

/// Where a user is in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingAddressForBalance,
    AwaitingAddressForTransactions,
    AwaitingSeedPhrase,
}

/// The three menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    CheckBalance,
    CheckTransactions,
    ConvertSeed,
}

/// The work done on the payload of an awaiting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Balance,
    Transactions,
    Seed,
}

/// An inbound text, read against the state it arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Command(MenuCommand),
    Payload(Flow, &'a str),
    Unrecognized,
}

impl MenuCommand {
    /// Menu order, top to bottom.
    pub const ALL: [MenuCommand; 3] = [
        MenuCommand::CheckBalance,
        MenuCommand::CheckTransactions,
        MenuCommand::ConvertSeed,
    ];

    /// Keyboard button text.
    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::CheckBalance => "🔍 Check balance",
            MenuCommand::CheckTransactions => "📜 Check transactions",
            MenuCommand::ConvertSeed => "🔄 Convert seed to address",
        }
    }

    pub fn alias(self) -> &'static str {
        match self {
            MenuCommand::CheckBalance => "/balance",
            MenuCommand::CheckTransactions => "/transactions",
            MenuCommand::ConvertSeed => "/seed",
        }
    }

    /// Matches a button label or slash alias exactly.
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| text == cmd.label() || text == cmd.alias())
    }

    pub fn target(self) -> ChatState {
        match self {
            MenuCommand::CheckBalance => ChatState::AwaitingAddressForBalance,
            MenuCommand::CheckTransactions => ChatState::AwaitingAddressForTransactions,
            MenuCommand::ConvertSeed => ChatState::AwaitingSeedPhrase,
        }
    }
}

impl ChatState {
    /// The flow whose payload this state waits for. `None` for `Idle`.
    pub fn flow(self) -> Option<Flow> {
        match self {
            ChatState::Idle => None,
            ChatState::AwaitingAddressForBalance => Some(Flow::Balance),
            ChatState::AwaitingAddressForTransactions => Some(Flow::Transactions),
            ChatState::AwaitingSeedPhrase => Some(Flow::Seed),
        }
    }

    /// Idle reads menu commands; awaiting states take any text as payload.
    pub fn classify(self, text: &str) -> Input<'_> {
        match self.flow() {
            Some(flow) => Input::Payload(flow, text),
            None => MenuCommand::parse(text).map_or(Input::Unrecognized, Input::Command),
        }
    }

    /// The transition table. Awaiting states have a single edge, back to `Idle`.
    pub fn next(self, input: &Input<'_>) -> ChatState {
        match (self, input) {
            (ChatState::Idle, Input::Command(cmd)) => cmd.target(),
            (ChatState::Idle, _) => ChatState::Idle,
            (
                ChatState::AwaitingAddressForBalance
                | ChatState::AwaitingAddressForTransactions
                | ChatState::AwaitingSeedPhrase,
                _,
            ) => ChatState::Idle,
        }
    }
}
