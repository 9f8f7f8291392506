use solana_sdk::pubkey::Pubkey;

use crate::core::account_resolver::ResolvedInstruction;

/// First instruction, in message order, invoking `program_id` with non-empty data.
///
/// A program index past the end of `accounts` never matches.
pub fn find_program_instruction<'a>(
    accounts: &[String],
    instructions: &'a [ResolvedInstruction],
    program_id: &Pubkey,
) -> Option<&'a ResolvedInstruction> {
    let target = program_id.to_string();
    instructions.iter().find(|ix| {
        !ix.data.is_empty()
            && accounts
                .get(ix.program_index as usize)
                .is_some_and(|key| *key == target)
    })
}
