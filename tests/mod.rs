mod reminder_scheduler;

// This file organizes the integration tests into a cohesive test suite.
// - reminder_scheduler: the polling loop driven by a mock source and a recording notifier
// - smoke_tests: basic wiring of config, parser and production components
