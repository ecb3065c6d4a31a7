use crate::runtime::contract::{InvocationKind, InvocationOutcome, InvocationRequest};

pub trait FunctionInvoker {
    fn invoke(
        &self,
        request: &InvocationRequest,
        invocation_type: InvocationKind,
    ) -> Result<InvocationOutcome, String>;
}
