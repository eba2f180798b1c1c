// End-to-end tests for the speech-convert service
//
// The router is exercised in-process through `tower::ServiceExt::oneshot`.
// Object storage is an in-memory store and speech synthesis is either a fake
// repository or the real Azure repository pointed at a mockito server, so no
// test leaves the machine.

mod helpers;
mod test_config;
mod test_function;
