//! Command set understood by a search server
//!
//! Send and control commands return the server's [`CommandResult`]: a
//! non-zero status means the server rejected the command for an application
//! reason and the connection stays usable. Query commands return decoded
//! values directly; they carry no application status on the wire, so their
//! only failure mode is a transport or decode error.

use symreg_protocol::payload::{self, tags};
use symreg_protocol::types::{
    DataSet, SearchOptions, SearchProgress, ServerInfo, SolutionFrontier, SolutionInfo,
};
use symreg_protocol::{CommandResult, Opcode};
use symreg_utils::{Result, SymregError};

use crate::connection::Connection;

impl Connection {
    /// Transfer a data set to the server
    pub fn send_data_set(&mut self, data: &DataSet) -> Result<CommandResult> {
        let payload = payload::encode(tags::DATA_SET, data)
            .map_err(|e| SymregError::internal(e.to_string()))?;
        self.write_command_packet(Opcode::SendDataSet, &payload)?;
        self.read_response()
    }

    /// Tell the server to load a data set from a path visible to it
    pub fn send_data_location(&mut self, path: &str) -> Result<CommandResult> {
        self.write_command_packet(Opcode::SendDataLocation, path.as_bytes())?;
        self.read_response()
    }

    /// Transfer search options to the server
    pub fn send_options(&mut self, options: &SearchOptions) -> Result<CommandResult> {
        let payload = payload::encode(tags::SEARCH_OPTIONS, options)
            .map_err(|e| SymregError::internal(e.to_string()))?;
        self.write_command_packet(Opcode::SendOptions, &payload)?;
        self.read_response()
    }

    /// Seed the search population with a single equation
    pub fn send_individual_text(&mut self, text: &str) -> Result<CommandResult> {
        self.send_individuals(&[SolutionInfo::new(text)])
    }

    /// Seed the search population with a single solution
    pub fn send_individual(&mut self, soln: SolutionInfo) -> Result<CommandResult> {
        self.send_individuals(&[soln])
    }

    /// Seed the search population with a set of solutions
    pub fn send_individuals(&mut self, individuals: &[SolutionInfo]) -> Result<CommandResult> {
        let payload = payload::encode(tags::VECTOR_SOLUTION_INFO, individuals)
            .map_err(|e| SymregError::internal(e.to_string()))?;
        self.write_command_packet(Opcode::SendIndividuals, &payload)?;
        self.read_response()
    }

    /// Query a snapshot of the search state
    pub fn query_progress(&mut self) -> Result<SearchProgress> {
        self.write_command(Opcode::QueryProgress)?;
        let packet = self.read_packet()?;
        payload::decode(tags::SEARCH_PROGRESS, &packet)
            .map_err(|e| SymregError::decode(e.to_string()))
    }

    /// Query the server's system information
    pub fn query_server_info(&mut self) -> Result<ServerInfo> {
        self.write_command(Opcode::QueryServerInfo)?;
        let packet = self.read_packet()?;
        payload::decode(tags::SERVER_INFO, &packet).map_err(|e| SymregError::decode(e.to_string()))
    }

    /// Query a random sample of individuals from the search population
    pub fn query_individuals(&mut self, count: i32) -> Result<Vec<SolutionInfo>> {
        self.write_command_fixed(Opcode::QueryIndividuals, count)?;
        let packet = self.read_packet()?;
        payload::decode(tags::VECTOR_SOLUTION_INFO, &packet)
            .map_err(|e| SymregError::decode(e.to_string()))
    }

    /// Query a single random individual from the search population
    pub fn query_individual(&mut self) -> Result<SolutionInfo> {
        let mut individuals = self.query_individuals(1)?;
        individuals
            .pop()
            .ok_or_else(|| SymregError::decode("Server returned no individuals"))
    }

    /// Query the server's current solution frontier
    pub fn query_frontier(&mut self) -> Result<SolutionFrontier> {
        self.write_command(Opcode::QueryFrontier)?;
        let packet = self.read_packet()?;
        payload::decode(tags::SOLUTION_FRONTIER, &packet)
            .map_err(|e| SymregError::decode(e.to_string()))
    }

    /// Start or resume searching
    pub fn start_search(&mut self) -> Result<CommandResult> {
        self.write_command(Opcode::StartSearch)?;
        self.read_response()
    }

    /// Pause searching, keeping the population
    pub fn pause_search(&mut self) -> Result<CommandResult> {
        self.write_command(Opcode::PauseSearch)?;
        self.read_response()
    }

    /// Stop searching and discard the population
    pub fn end_search(&mut self) -> Result<CommandResult> {
        self.write_command(Opcode::EndSearch)?;
        self.read_response()
    }

    /// Have the server evaluate solutions against its loaded data set,
    /// filling in score, fitness, and complexity
    pub fn calc_solution_info(&mut self, solutions: &[SolutionInfo]) -> Result<Vec<SolutionInfo>> {
        let payload = payload::encode(tags::VECTOR_SOLUTION_INFO, solutions)
            .map_err(|e| SymregError::internal(e.to_string()))?;
        self.write_command_packet(Opcode::CalcSolutionInfo, &payload)?;
        let packet = self.read_packet()?;
        payload::decode(tags::VECTOR_SOLUTION_INFO, &packet)
            .map_err(|e| SymregError::decode(e.to_string()))
    }

    /// Evaluate a single solution against the server's loaded data set
    pub fn calc_single_solution_info(&mut self, soln: &SolutionInfo) -> Result<SolutionInfo> {
        let mut evaluated = self.calc_solution_info(std::slice::from_ref(soln))?;
        evaluated
            .pop()
            .ok_or_else(|| SymregError::decode("Server returned no evaluated solutions"))
    }
}
