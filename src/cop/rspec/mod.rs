pub mod expect_actual;
pub mod literal;
pub mod matchers;
pub mod stubbed_mock;

use super::registry::CopRegistry;

pub fn register_all(registry: &mut CopRegistry) {
    registry.register(Box::new(expect_actual::ExpectActual));
    registry.register(Box::new(stubbed_mock::StubbedMock));
}
