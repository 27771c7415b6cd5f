//! Interactive prompts for payment details.

use std::io::{BufRead, Write};

use crate::gateway::PaymentRequest;

/// Read the three payment fields from `input`, writing prompts to
/// `output`.
///
/// Values are trimmed but not validated here; validation happens before
/// any network call in the collection flow.
pub fn read_payment_request<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<PaymentRequest> {
    let from = prompt_line(input, output, "Enter mobile money number: ")?;
    let amount = prompt_line(input, output, "Enter amount: ")?;
    let description = prompt_line(input, output, "Enter description: ")?;

    Ok(PaymentRequest {
        amount,
        from,
        description,
    })
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> std::io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
