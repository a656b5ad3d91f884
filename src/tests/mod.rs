


#[cfg(test)]
mod history_tests;

#[cfg(test)]
mod command_integration_tests;
