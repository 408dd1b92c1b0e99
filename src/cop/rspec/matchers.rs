//! Structural matchers for RSpec expectation and mock call shapes.
//!
//! Each matcher is a pure predicate (or optional capture) over a Prism
//! node. Matching looks only at node kind, method name, argument arity
//! and block presence; chained shapes recurse exactly one level into the
//! receiver, never arbitrarily deep. Anything that doesn't line up is
//! simply not a match.

/// Runner methods that apply a matcher to an expectation target.
fn is_runner(name: &[u8]) -> bool {
    matches!(name, b"to" | b"not_to" | b"to_not")
}

/// Mocking entry points that establish a message expectation.
fn is_mock_entry(name: &[u8]) -> bool {
    matches!(name, b"receive" | b"receive_message_chain")
}

/// Chained methods that attach a canned response to a message expectation.
fn is_configured_response(name: &[u8]) -> bool {
    matches!(
        name,
        b"and_return"
            | b"and_raise"
            | b"and_throw"
            | b"and_yield"
            | b"and_call_original"
            | b"and_wrap_original"
    )
}

/// The assertion entry points that can root an expectation chain, with
/// the stub-friendly replacement each one gets named against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectationEntry {
    Expect,
    IsExpected,
    ExpectAnyInstanceOf,
}

impl ExpectationEntry {
    fn from_method_name(name: &[u8]) -> Option<Self> {
        match name {
            b"expect" => Some(Self::Expect),
            b"is_expected" => Some(Self::IsExpected),
            b"expect_any_instance_of" => Some(Self::ExpectAnyInstanceOf),
            _ => None,
        }
    }

    pub fn method_name(self) -> &'static str {
        match self {
            Self::Expect => "expect",
            Self::IsExpected => "is_expected",
            Self::ExpectAnyInstanceOf => "expect_any_instance_of",
        }
    }

    pub fn replacement(self) -> &'static str {
        match self {
            Self::Expect => "allow",
            Self::IsExpected => "allow(subject)",
            Self::ExpectAnyInstanceOf => "allow_any_instance_of",
        }
    }
}

/// Capture for a full expectation chain `<entry>.to <matcher>`.
pub struct Expectation<'pr> {
    pub entry: ExpectationEntry,
    /// The entry call node (`expect(...)`, `is_expected`, ...) — the
    /// diagnostic anchor.
    pub entry_node: ruby_prism::Node<'pr>,
    /// The matcher expression passed to the runner.
    pub matcher: ruby_prism::Node<'pr>,
}

/// Matches `expect(...).to <matcher>`, `is_expected.to <matcher>` or
/// `expect_any_instance_of(...).to <matcher>` (also `not_to`/`to_not`),
/// where the entry call has no receiver.
pub fn expectation<'pr>(node: &ruby_prism::Node<'pr>) -> Option<Expectation<'pr>> {
    let runner = node.as_call_node()?;
    if !is_runner(runner.name().as_slice()) {
        return None;
    }
    let matcher = sole_argument(&runner)?;

    let entry_node = runner.receiver()?;
    let entry_call = entry_node.as_call_node()?;
    if entry_call.receiver().is_some() {
        return None;
    }
    // A block target (`expect { foo }.to ...`) is not an expectation on a
    // receiver; message-expectation matchers don't apply to it.
    if entry_call
        .block()
        .is_some_and(|b| b.as_block_node().is_some())
    {
        return None;
    }
    let entry = ExpectationEntry::from_method_name(entry_call.name().as_slice())?;

    Some(Expectation {
        entry,
        entry_node,
        matcher,
    })
}

/// Matches `expect(<arg>).to ...` where `expect` has no receiver and
/// exactly one argument; captures that argument (the "actual" position).
pub fn expectation_argument<'pr>(node: &ruby_prism::Node<'pr>) -> Option<ruby_prism::Node<'pr>> {
    let runner = node.as_call_node()?;
    if !is_runner(runner.name().as_slice()) {
        return None;
    }
    let receiver = runner.receiver()?;
    let expect_call = receiver.as_call_node()?;
    if expect_call.receiver().is_some() || expect_call.name().as_slice() != b"expect" {
        return None;
    }
    sole_argument(&expect_call)
}

/// Whether `node` is a message expectation:
///
///   receive(...)
///   receive_message_chain(...)
///   receive(...).with(...)
///
/// Nothing else qualifies — `receive(:foo).twice` breaks the chain, and
/// `receive_message_chain(...).with(...)` is not a recognized shape.
pub fn message_expectation(node: &ruby_prism::Node<'_>) -> bool {
    let call = match node.as_call_node() {
        Some(c) => c,
        None => return false,
    };
    if call.receiver().is_none() {
        return is_mock_entry(call.name().as_slice());
    }
    call.name().as_slice() == b"with" && receiver_is_bare_receive(&call)
}

fn receiver_is_bare_receive(call: &ruby_prism::CallNode<'_>) -> bool {
    call.receiver()
        .and_then(|r| r.as_call_node().map(|rc| (rc.receiver().is_none(), rc)))
        .is_some_and(|(bare, rc)| bare && rc.name().as_slice() == b"receive")
}

/// Matches a configured response chained onto a message expectation with
/// exactly one argument, e.g. `receive(:foo).and_return("bar")` or
/// `receive(:foo).with(42).and_raise(Error)`. A bare
/// `receive(:foo).and_call_original` takes no argument and does not match.
pub fn matcher_with_configured_response(node: &ruby_prism::Node<'_>) -> bool {
    let call = match node.as_call_node() {
        Some(c) => c,
        None => return false,
    };
    if !is_configured_response(call.name().as_slice()) {
        return false;
    }
    if argument_count(&call) != 1 {
        return false;
    }
    match call.receiver() {
        Some(receiver) => message_expectation(&receiver),
        None => false,
    }
}

/// Matches a message expectation with an attached literal block supplying
/// the response, e.g. `receive(:foo) { "bar" }`.
pub fn matcher_with_return_block(node: &ruby_prism::Node<'_>) -> bool {
    if !message_expectation(node) {
        return false;
    }
    let call = match node.as_call_node() {
        Some(c) => c,
        None => return false,
    };
    call.block().is_some_and(|b| b.as_block_node().is_some())
}

/// Matches the implicit-response argument forms:
///
///   receive(:foo, &canned)              — block pass on the entry call
///   receive(:foo).with(42, &canned)     — block pass on the `.with`
///   receive_messages(foo: "bar")        — sole hash argument
///   receive_message_chain(:a, b: "c")   — trailing hash argument
pub fn matcher_with_blockpass_or_hash(node: &ruby_prism::Node<'_>) -> bool {
    let call = match node.as_call_node() {
        Some(c) => c,
        None => return false,
    };
    let name = call.name().as_slice();

    let has_blockpass = call
        .block()
        .is_some_and(|b| b.as_block_argument_node().is_some());
    if has_blockpass {
        if call.receiver().is_none() && is_mock_entry(name) {
            return true;
        }
        if name == b"with" && receiver_is_bare_receive(&call) {
            return true;
        }
    }

    if call.receiver().is_some() {
        return false;
    }
    match name {
        b"receive_messages" => {
            argument_count(&call) == 1 && call.arguments().is_some_and(|a| {
                a.arguments().iter().next().is_some_and(|arg| is_hash(&arg))
            })
        }
        b"receive_message_chain" => call
            .arguments()
            .and_then(|a| a.arguments().iter().last())
            .is_some_and(|arg| is_hash(&arg)),
        _ => false,
    }
}

fn is_hash(node: &ruby_prism::Node<'_>) -> bool {
    node.as_hash_node().is_some() || node.as_keyword_hash_node().is_some()
}

fn argument_count(call: &ruby_prism::CallNode<'_>) -> usize {
    call.arguments().map_or(0, |a| a.arguments().iter().count())
}

fn sole_argument<'pr>(call: &ruby_prism::CallNode<'pr>) -> Option<ruby_prism::Node<'pr>> {
    let arguments = call.arguments()?;
    let mut iter = arguments.arguments().iter();
    let first = iter.next()?;
    if iter.next().is_some() {
        return None;
    }
    Some(first)
}
