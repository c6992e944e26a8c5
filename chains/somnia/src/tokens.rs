use std::fmt;

/// The two faucet-mintable test tokens traded against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestToken {
    Ping,
    Pong,
}

impl TestToken {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestToken::Ping => "PING",
            TestToken::Pong => "PONG",
        }
    }

    pub fn other(&self) -> TestToken {
        match self {
            TestToken::Ping => TestToken::Pong,
            TestToken::Pong => TestToken::Ping,
        }
    }
}

impl fmt::Display for TestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    PingToPong,
    PongToPing,
}

impl SwapDirection {
    pub fn token_in(&self) -> TestToken {
        match self {
            SwapDirection::PingToPong => TestToken::Ping,
            SwapDirection::PongToPing => TestToken::Pong,
        }
    }

    pub fn token_out(&self) -> TestToken {
        self.token_in().other()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.token_in(), self.token_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_opposite() {
        assert_eq!(SwapDirection::PingToPong.token_out(), TestToken::Pong);
        assert_eq!(SwapDirection::PongToPing.token_out(), TestToken::Ping);
        assert_eq!(SwapDirection::PongToPing.to_string(), "PONG->PING");
    }
}
