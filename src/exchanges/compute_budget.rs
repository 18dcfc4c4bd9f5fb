use solana_sdk::{
    instruction::Instruction,
    compute_budget::ComputeBudgetInstruction,
};

/// Create ComputeBudget instruction to set the price per compute unit
pub fn create_unit_price_instruction(micro_lamports_per_unit: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports_per_unit)
}

/// Create ComputeBudget instruction to set compute unit limit
pub fn create_compute_unit_limit_instruction(compute_units: u32) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(compute_units)
}

/// Limit first, then price; a zero price is left out
pub fn create_compute_budget_instructions(
    compute_units: u32,
    micro_lamports_per_unit: u64,
) -> Vec<Instruction> {
    let mut instructions = vec![create_compute_unit_limit_instruction(compute_units)];
    if micro_lamports_per_unit > 0 {
        instructions.push(create_unit_price_instruction(micro_lamports_per_unit));
    }
    instructions
}
